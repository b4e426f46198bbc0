use std::collections::BTreeMap;
use std::time::Duration;

use cutframe::adapters::DRY_RUN;
use cutframe::app::{AppContainer, PrepareRequest};
use cutframe::config::Config;
use cutframe::*;

/// Rectangles covering inverted, out-of-frame, degenerate and nested cases
fn sample_rects() -> Vec<Rect> {
    vec![
        Rect::new(0, 0, 1920, 1080),
        Rect::new(910, 490, 1010, 590),
        Rect::new(1010, 590, 910, 490),
        Rect::new(-200, -100, 400, 300),
        Rect::new(1800, 1000, 2500, 1500),
        Rect::new(3000, 3000, 4000, 4000),
        Rect::new(100, 100, 100, 500),
        Rect::new(5, 7, 6, 8),
        Rect::new(0, 0, 33, 1080),
    ]
}

mod range_properties {
    use super::*;

    #[test]
    fn test_canon_is_idempotent_and_ordered() {
        for (a, b) in [(1.0, 2.0), (2.0, 1.0), (-3.5, -7.25), (0.0, 0.0)] {
            let canon = Range::new(a, b).canon();
            assert_eq!(canon.canon(), canon);
            assert!(canon.start <= canon.end);
        }
    }

    #[test]
    fn test_size_is_non_negative() {
        assert_eq!(Range::new(4.0, 4.0).size(), Duration::ZERO);
        assert_eq!(Range::new(5.0, 2.0).size(), Range::new(2.0, 5.0).size());
        assert_eq!(Range::new(5.0, 2.0).size(), Duration::from_secs(3));
    }

    #[test]
    fn test_parse_timecode() {
        let range = Range::parse("01:02:03:12", 24.0).unwrap();
        assert_eq!(range, Range::new(0.0, 3723.5));
        assert_eq!(range.timecode(24.0), "01:02:03:00");

        let err = Range::parse("bad", 0.0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimecode { .. }));
    }

    #[test]
    fn test_range_wire_form() {
        let range = Range::new(0.000001, 1e21);
        let json = serde_json::to_string(&range).unwrap();
        assert!(!json.contains('e'));
        assert_eq!(serde_json::from_str::<Range>(&json).unwrap(), range);
    }
}

mod splice_properties {
    use super::*;

    #[test]
    fn test_union_contains_every_member() {
        let splices = [
            "[[1,2]]",
            "[[5,9],[1,3],[2,4]]",
            "[[0,10],[10,20],[3,30],[-1,2]]",
        ];
        for text in splices {
            let splice: Splice = text.parse().unwrap();
            assert!(splice.within(splice.union()), "{} not within its union", text);
        }
    }

    #[test]
    fn test_sort_orders_by_start_then_span() {
        let mut splice: Splice = "[[2,3],[1,5],[1,2]]".parse().unwrap();
        assert!(!splice.is_sorted());
        splice.sort();
        assert!(splice.is_sorted());
        assert_eq!(splice.encode(), "[[1,2],[1,5],[2,3]]");
    }

    #[test]
    fn test_decode_failure_leaves_splice_untouched() {
        let mut splice: Splice = "[[1,2]]".parse().unwrap();
        assert!(splice.decode(b"[[1,2],[3").is_err());
        assert_eq!(splice.encode(), "[[1,2]]");

        splice.decode(b"").unwrap();
        assert!(splice.is_empty());
    }

    #[test]
    fn test_splice_inside_job_json() {
        let job = JobSpec {
            id: "job-1".to_string(),
            source: "in.mov".to_string(),
            destination: "out.mp4".to_string(),
            splice: "[[0,1.5],[10,20]]".parse().unwrap(),
            crop: Crop::default(),
            frame: Rect::from_size(640, 480),
            output: Rect::from_size(640, 480),
            fps: 25.0,
        };
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains(r#""splice":[[0,1.5],[10,20]]"#));
        assert_eq!(serde_json::from_str::<JobSpec>(&json).unwrap(), job);
    }
}

mod geometry_properties {
    use super::*;

    #[test]
    fn test_from_rect_then_rect_clips_and_canonicalizes() {
        let source = Rect::from_size(1920, 1080);
        for r in sample_rects() {
            let expected = r.canon().intersect(source);
            let roundtrip = Crop::from_rect(source, r).rect(source);
            if expected.is_empty() {
                assert!(roundtrip.is_empty(), "{} should collapse", r);
            } else {
                assert_eq!(roundtrip, expected, "round trip of {}", r);
            }
        }
    }

    #[test]
    fn test_aspect() {
        assert_eq!(aspect(Rect::from_size(1920, 1080)), Point::new(16, 9));
        assert_eq!(aspect(Rect::from_size(0, 720)), Point::ZERO);
        assert_eq!(aspect(Rect::from_size(640, 480)), Point::new(4, 3));
    }

    #[test]
    fn test_scale_centered_square_crop() {
        let source = Rect::from_size(1920, 1080);
        let crop = Rect::new(910, 490, 1010, 590);
        let scaled = scale(source, crop);

        assert_eq!(scaled, Rect::new(912, 513, 1008, 567));
        assert_eq!(scaled.width() * 9, scaled.height() * 16);
        assert!(crop.contains(&scaled));
        assert_eq!(scaled.center(), crop.center());
    }

    #[test]
    fn test_scale_properties_over_sample_rects() {
        let source = Rect::from_size(1920, 1080);
        let ar = aspect(source);
        for r in sample_rects() {
            let clipped = r.canon().intersect(source);
            let scaled = scale(source, r);

            assert_eq!(scaled.width() * ar.y, scaled.height() * ar.x, "ratio of {}", r);
            assert!(scaled.width() <= clipped.width(), "width of {}", r);
            assert!(scaled.height() <= clipped.height(), "height of {}", r);

            let drift = scaled.center() - clipped.center();
            assert!(drift.x.abs() <= 1 && drift.y.abs() <= 1, "center of {}", r);
        }
    }

    #[test]
    fn test_scale_zero_area_source_returns_clipped_crop() {
        let source = Rect::from_size(0, 1080);
        let crop = Rect::new(-10, 10, 10, 20);
        assert_eq!(scale(source, crop), crop.canon().intersect(source));
    }
}

mod job_flow {
    use super::*;

    fn request() -> PrepareRequest {
        PrepareRequest {
            job_id: Some("job-42".to_string()),
            source: "s3://in/a.mov".to_string(),
            destination: "file:///out/a.mp4".to_string(),
            splice: "[[30,60],[0,30]]".to_string(),
            duration: Some("00:01:30".to_string()),
            crop: Crop::new(100, 0, 100, 0),
            width: 1920,
            height: 1080,
            keep_aspect: true,
            fps: 0.0,
        }
    }

    #[tokio::test]
    async fn test_submit_to_dry_run() {
        let container = AppContainer::new(Config::default()).unwrap();
        let preparer = container.preparer();

        let job = preparer.prepare(&request()).unwrap();
        assert_eq!(job.splice.encode(), "[[0,30],[30,60]]");
        assert_eq!(job.crop, Crop::new(104, 59, 104, 58));
        assert_eq!(job.output_size(), (1712, 963));
        assert_eq!(job.spliced_duration(), Some(Duration::from_secs(60)));

        let status = preparer.submit(DRY_RUN, &request()).await.unwrap();
        assert_eq!(status.job_id, "job-42");
        assert_eq!(status.state, JobState::Queued);
    }

    #[tokio::test]
    async fn test_splice_outside_duration_is_rejected() {
        let container = AppContainer::new(Config::default()).unwrap();
        let mut request = request();
        request.duration = Some("00:00:45".to_string());

        let err = container
            .preparer()
            .submit(DRY_RUN, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidJob(_)));
    }

    #[tokio::test]
    async fn test_disabled_provider_is_listed_but_unavailable() {
        let mut config = Config::default();
        config.providers.insert(
            DRY_RUN.to_string(),
            BTreeMap::from([("enabled".to_string(), "false".to_string())]),
        );
        let container = AppContainer::new(config).unwrap();
        let registry = container.registry();

        assert_eq!(registry.names(), vec![DRY_RUN]);
        assert!(registry.list(&container.config()).is_empty());

        let description = registry.describe(DRY_RUN, &container.config()).await.unwrap();
        assert!(!description.enabled);
        assert!(!description.health.ok);

        let err = container
            .preparer()
            .submit(DRY_RUN, &request())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProviderUnavailable(_)));
    }
}
