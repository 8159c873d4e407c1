use crate::tracing_config::{LogFormat, LogSettings, verbosity_filter};

#[test]
fn quiet_by_default() {
    let settings = LogSettings::resolve(0, LogFormat::Text, None);
    assert_eq!(settings.filter, None);
}

#[test]
fn verbosity_enables_pipeline_crates_only() {
    assert_eq!(
        verbosity_filter(1).as_deref(),
        Some("j2k=warn,j2k_binder=warn,j2k_emitter=warn")
    );
    assert_eq!(
        verbosity_filter(2).as_deref(),
        Some("j2k=debug,j2k_binder=debug,j2k_emitter=debug")
    );
    assert_eq!(
        verbosity_filter(7).as_deref(),
        Some("j2k=trace,j2k_binder=trace,j2k_emitter=trace")
    );
}

#[test]
fn environment_filter_replaces_flags() {
    let settings = LogSettings::resolve(1, LogFormat::Tree, Some("j2k_emitter=trace".to_string()));
    assert_eq!(settings.filter.as_deref(), Some("j2k_emitter=trace"));
    assert_eq!(settings.format, LogFormat::Tree);
}

#[test]
fn blank_environment_filter_is_ignored() {
    let settings = LogSettings::resolve(2, LogFormat::Json, Some("  ".to_string()));
    assert_eq!(
        settings.filter.as_deref(),
        Some("j2k=debug,j2k_binder=debug,j2k_emitter=debug")
    );
}
