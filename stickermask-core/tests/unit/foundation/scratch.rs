use super::*;

#[test]
fn scratch_window_has_requested_len_and_is_zeroed() {
    let g = ScratchGrid::try_new(37, usize::MAX).unwrap();
    assert_eq!(g.as_slice().len(), 37);
    assert!(g.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn scratch_window_is_page_aligned() {
    let g = ScratchGrid::try_new(1000, usize::MAX).unwrap();
    assert!(g.is_page_aligned());
}

#[test]
fn scratch_writes_stay_inside_window() {
    let mut g = ScratchGrid::try_new(4, usize::MAX).unwrap();
    g.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(g.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn scratch_limit_is_enforced() {
    let err = ScratchGrid::try_new(16, 0).err().unwrap();
    assert!(matches!(err, MaskError::Memory(_)));
}

#[test]
fn scratch_overflow_is_memory_error() {
    let err = ScratchGrid::try_new(usize::MAX, usize::MAX).err().unwrap();
    assert!(matches!(err, MaskError::Memory(_)));
}

#[test]
fn alloc_grid_reports_impossible_requests() {
    assert_eq!(alloc_grid(5, usize::MAX).unwrap(), vec![0.0; 5]);
    assert!(matches!(
        alloc_grid(usize::MAX, usize::MAX),
        Err(MaskError::Memory(_))
    ));
    assert!(matches!(
        alloc_grid(usize::MAX / 2, usize::MAX),
        Err(MaskError::Memory(_))
    ));
}

#[test]
fn alloc_grid_honors_byte_limit() {
    assert_eq!(alloc_grid(4, 32).unwrap(), vec![0.0; 4]);
    assert!(matches!(alloc_grid(5, 32), Err(MaskError::Memory(_))));
}
