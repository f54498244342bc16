use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MaskError::invalid_params("x")
            .to_string()
            .contains("invalid params:")
    );
    assert!(MaskError::memory("x").to_string().contains("memory error:"));
    assert!(
        MaskError::processing("x")
            .to_string()
            .contains("processing error:")
    );
    assert!(
        MaskError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MaskError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn status_codes_match_host_contract() {
    assert_eq!(StatusCode::Success.code(), 0);
    assert_eq!(StatusCode::InvalidParams.code(), -1);
    assert_eq!(StatusCode::Memory.code(), -2);
    assert_eq!(StatusCode::Processing.code(), -3);
}

#[test]
fn errors_map_to_status() {
    assert_eq!(
        MaskError::invalid_params("x").status(),
        StatusCode::InvalidParams
    );
    assert_eq!(MaskError::validation("x").status(), StatusCode::InvalidParams);
    assert_eq!(MaskError::memory("x").status(), StatusCode::Memory);
    assert_eq!(MaskError::processing("x").status(), StatusCode::Processing);

    let ok: MaskResult<()> = Ok(());
    assert_eq!(StatusCode::of(&ok), StatusCode::Success);
    let err: MaskResult<()> = Err(MaskError::memory("x"));
    assert_eq!(StatusCode::of(&err), StatusCode::Memory);
}
