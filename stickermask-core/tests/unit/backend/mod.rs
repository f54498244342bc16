use super::*;

fn dims(w: u32, h: u32) -> GridDims {
    GridDims::new(w, h).unwrap()
}

#[test]
fn auto_resolves_to_a_concrete_kind_once() {
    let first = BackendKind::Auto.resolve();
    assert_ne!(first, BackendKind::Auto);
    assert_eq!(BackendKind::Auto.resolve(), first);
    assert_eq!(BackendKind::Scalar.resolve(), BackendKind::Scalar);
    assert_eq!(BackendKind::Parallel.resolve(), BackendKind::Parallel);
}

#[test]
fn create_backend_honors_kind() {
    let s = KernelSettings::default();
    assert_eq!(
        create_backend(BackendKind::Scalar, &s).unwrap().name(),
        "scalar"
    );
    assert_eq!(
        create_backend(BackendKind::Parallel, &s).unwrap().name(),
        "parallel"
    );
}

#[test]
fn backend_kind_parses_from_str() {
    assert_eq!("Scalar".parse::<BackendKind>().unwrap(), BackendKind::Scalar);
    assert_eq!(
        " parallel ".parse::<BackendKind>().unwrap(),
        BackendKind::Parallel
    );
    assert_eq!("auto".parse::<BackendKind>().unwrap(), BackendKind::Auto);
    assert!("neon".parse::<BackendKind>().is_err());
}

#[test]
fn scratch_limit_surfaces_as_memory_error_on_both_backends() {
    let settings = KernelSettings {
        max_scratch_bytes: 0,
    };
    let d = dims(4, 4);
    let mask = vec![0.25; 16];
    for backend in [
        Box::new(ScalarBackend::new(settings)) as Box<dyn KernelBackend>,
        Box::new(ParallelBackend::new(settings)),
    ] {
        let mut out = vec![-7.0; 16];
        let err = backend.smooth(&mask, &mut out, d, 3).err().unwrap();
        assert!(matches!(err, MaskError::Memory(_)), "{}", backend.name());
        assert!(out.iter().all(|&v| v == -7.0), "output must stay untouched");

        let err = backend
            .expand(&mask, &mut out, d, 5, ExpandStrategy::hybrid())
            .err()
            .unwrap();
        assert!(matches!(err, MaskError::Memory(_)), "{}", backend.name());
        assert!(out.iter().all(|&v| v == -7.0), "output must stay untouched");
    }
}

#[test]
fn scratch_free_paths_ignore_the_limit() {
    let backend = ScalarBackend::new(KernelSettings {
        max_scratch_bytes: 0,
    });
    let d = dims(3, 3);
    let mut mask = vec![0.0; 9];
    mask[4] = 1.0;
    let mut out = vec![0.0; 9];

    backend.smooth(&mask, &mut out, d, 1).unwrap();
    assert_eq!(out, mask);

    backend
        .expand(&mask, &mut out, d, 1, ExpandStrategy::Disk)
        .unwrap();
    assert_eq!(out, vec![0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0]);
}
