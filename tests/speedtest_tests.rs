// Speed normalization and the speedtest-cli backend

mod common;

use common::{FakeSpeedTester, raw_speed};
use wifi_bench::error::CollectorError;
use wifi_bench::models::RawSpeed;
use wifi_bench::speedtest::{
    SpeedtestCli, bps_to_mbps, normalize, parse_speedtest_json, run_speedtest,
};

#[test]
fn test_normalize_converts_bits_to_mbps() {
    let speed = normalize(raw_speed()).unwrap();
    assert_eq!(speed.download_mbps, 432.4);
    assert_eq!(speed.upload_mbps, 93.5);
    assert_eq!(speed.ping_ms, 12.4);
}

#[test]
fn test_bps_to_mbps_rounds_to_one_decimal() {
    let cases = [
        (0.0, 0.0),
        (1_000_000.0, 1.0),
        (1_049_999.0, 1.0),
        (1_050_001.0, 1.1),
        (99_960_000.0, 100.0),
        (412_300_000.0, 412.3),
        (89_149_000.0, 89.1),
    ];
    for (bps, expected) in cases {
        assert_eq!(bps_to_mbps(bps), expected, "bps = {bps}");
    }
}

#[test]
fn test_bps_to_mbps_rounds_exact_ties_away_from_zero() {
    assert_eq!(bps_to_mbps(250_000.0), 0.3);
    assert_eq!(bps_to_mbps(150_000.0), 0.2);
    assert_eq!(bps_to_mbps(1_250_000.0), 1.3);
}

#[test]
fn test_normalize_passes_ping_through() {
    let raw = RawSpeed {
        download_bps: 1.0,
        upload_bps: 1.0,
        ping_ms: 7.123,
    };
    assert_eq!(normalize(raw).unwrap().ping_ms, 7.123);
}

#[test]
fn test_normalize_rejects_negative_and_non_finite() {
    let bad = [
        RawSpeed { download_bps: -1.0, ..raw_speed() },
        RawSpeed { upload_bps: f64::NAN, ..raw_speed() },
        RawSpeed { ping_ms: f64::INFINITY, ..raw_speed() },
    ];
    for raw in bad {
        let err = normalize(raw).unwrap_err();
        assert!(matches!(err, CollectorError::Measurement(_)), "{raw:?}");
    }
}

#[test]
fn test_parse_speedtest_json_ignores_extra_keys() {
    let text = r#"{"download": 432399360.0, "upload": 93478912.0, "ping": 12.4,
        "server": {"name": "Tokyo"}, "timestamp": "2026-02-22T10:00:00Z", "bytes_sent": 1}"#;
    let raw = parse_speedtest_json(text).unwrap();
    assert_eq!(raw, raw_speed());
}

#[test]
fn test_parse_speedtest_json_rejects_garbage() {
    for text in ["", "Cannot retrieve speedtest configuration", r#"{"download": 1.0}"#] {
        let err = parse_speedtest_json(text).unwrap_err();
        assert_eq!(err.kind(), "measurement", "{text:?}");
    }
}

#[tokio::test]
async fn test_run_speedtest_normalizes_backend_result() {
    let tester = FakeSpeedTester::default();
    let speed = run_speedtest(&tester).await.unwrap();
    assert_eq!(speed.download_mbps, 432.4);
    assert!(speed.upload_mbps > 0.0);
    assert!(speed.ping_ms > 0.0);
}

#[tokio::test]
async fn test_run_speedtest_surfaces_backend_error_as_measurement() {
    let tester = FakeSpeedTester::scripted(vec![Err("network error".into())]);
    let err = run_speedtest(&tester).await.unwrap_err();
    assert!(matches!(err, CollectorError::Measurement(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_speedtest_cli_reads_json_from_stdout() {
    let tester = SpeedtestCli::new(
        "sh",
        vec![
            "-c".into(),
            r#"echo '{"download": 432399360.0, "upload": 93478912.0, "ping": 12.4}'"#.into(),
        ],
    );
    let speed = run_speedtest(&tester).await.unwrap();
    assert_eq!(speed.download_mbps, 432.4);
    assert_eq!(speed.upload_mbps, 93.5);
    assert_eq!(speed.ping_ms, 12.4);
}

#[cfg(unix)]
#[tokio::test]
async fn test_speedtest_cli_nonzero_exit_is_measurement_error() {
    let tester = SpeedtestCli::new("sh", vec!["-c".into(), "echo boom >&2; exit 3".into()]);
    let err = run_speedtest(&tester).await.unwrap_err();
    assert!(matches!(err, CollectorError::Measurement(_)));
    assert!(err.to_string().contains("boom"), "{err}");
}

#[tokio::test]
async fn test_speedtest_cli_missing_binary_is_measurement_error() {
    let tester = SpeedtestCli::new("/nonexistent/wifi-bench-test/speedtest-cli", vec![]);
    let err = run_speedtest(&tester).await.unwrap_err();
    assert!(matches!(err, CollectorError::Measurement(_)));
}
