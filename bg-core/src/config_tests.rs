use crate::config::{Config, StartSeat};

#[test]
fn empty_document_yields_defaults() {
    let cfg = Config::from_yaml("{}").unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.session.seed, 0);
    assert_eq!(cfg.session.start_seat, StartSeat::Random);
    assert_eq!(cfg.env.reward_window, 4500);
    assert_eq!(cfg.logging.flush_every_lines, 64);
}

#[test]
fn partial_document_overrides_only_named_fields() {
    let yaml = r#"
session:
  seed: 42
  start_seat: p2
env:
  reward_window: 100
"#;
    let cfg = Config::from_yaml(yaml).unwrap();
    assert_eq!(cfg.session.seed, 42);
    assert_eq!(cfg.session.start_seat, StartSeat::P2);
    assert_eq!(cfg.env.reward_window, 100);
    assert_eq!(cfg.logging.dir, "logs");
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(Config::from_yaml("session: [not a map").is_err());
}

#[test]
fn round_trips_through_yaml() {
    let mut cfg = Config::default();
    cfg.session.seed = 7;
    cfg.logging.dir = "out/runs".to_string();
    let text = serde_yaml::to_string(&cfg).unwrap();
    assert_eq!(Config::from_yaml(&text).unwrap(), cfg);
}
