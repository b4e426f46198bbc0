// Unit tests for job preparation

use super::*;
use crate::adapters::{DryRunProvider, DRY_RUN};
use crate::domain::geometry::{aspect, Point};

fn create_test_preparer() -> JobPreparer {
    let mut registry = ProviderRegistry::new();
    registry.register(DRY_RUN, DryRunProvider::factory).unwrap();
    JobPreparer::new(Arc::new(registry), Arc::new(Config::default()))
}

fn create_test_request() -> PrepareRequest {
    PrepareRequest {
        job_id: Some("job-42".to_string()),
        source: "in.mov".to_string(),
        destination: "out.mp4".to_string(),
        splice: "[[0,10],[20,30]]".to_string(),
        duration: Some("00:01:00:00".to_string()),
        crop: Crop::new(0, 0, 0, 0),
        width: 1920,
        height: 1080,
        keep_aspect: false,
        fps: 24.0,
    }
}

#[test]
fn test_prepare_plain_request() {
    let job = create_test_preparer().prepare(&create_test_request()).unwrap();
    assert_eq!(job.id, "job-42");
    assert_eq!(job.splice.encode(), "[[0,10],[20,30]]");
    assert_eq!(job.output, Rect::from_size(1920, 1080));
    assert_eq!(job.fps, 24.0);
}

#[test]
fn test_prepare_sorts_splice() {
    let request = PrepareRequest {
        splice: "[[20,30],[0,10]]".to_string(),
        ..create_test_request()
    };
    let job = create_test_preparer().prepare(&request).unwrap();
    assert!(job.splice.is_sorted());
    assert_eq!(job.splice.encode(), "[[0,10],[20,30]]");
}

#[test]
fn test_prepare_rejects_splice_past_duration() {
    let request = PrepareRequest {
        splice: "[[0,10],[50,70]]".to_string(),
        ..create_test_request()
    };
    assert!(matches!(
        create_test_preparer().prepare(&request),
        Err(DomainError::InvalidJob(_))
    ));
}

#[test]
fn test_prepare_propagates_codec_errors() {
    let bad_splice = PrepareRequest {
        splice: "[[0,10],[5".to_string(),
        ..create_test_request()
    };
    assert!(matches!(
        create_test_preparer().prepare(&bad_splice),
        Err(DomainError::SpliceDecode(_))
    ));

    let bad_duration = PrepareRequest {
        duration: Some("one minute".to_string()),
        ..create_test_request()
    };
    assert!(matches!(
        create_test_preparer().prepare(&bad_duration),
        Err(DomainError::InvalidTimecode { .. })
    ));
}

#[test]
fn test_prepare_without_splice_or_duration() {
    let request = PrepareRequest {
        job_id: None,
        splice: String::new(),
        duration: None,
        ..create_test_request()
    };
    let job = create_test_preparer().prepare(&request).unwrap();
    assert!(job.splice.is_empty());
    assert!(job.id.starts_with("job-"));
}

#[test]
fn test_prepare_keep_aspect_scales_crop() {
    let request = PrepareRequest {
        crop: Crop::new(100, 0, 100, 0),
        keep_aspect: true,
        ..create_test_request()
    };
    let job = create_test_preparer().prepare(&request).unwrap();
    assert_eq!(job.crop, Crop::new(104, 59, 104, 58));
    assert_eq!(aspect(job.output), Point::new(16, 9));
}

#[test]
fn test_prepare_rejects_empty_frame_and_output() {
    let no_frame = PrepareRequest {
        width: 0,
        ..create_test_request()
    };
    assert!(create_test_preparer().prepare(&no_frame).is_err());

    let over_cropped = PrepareRequest {
        crop: Crop::new(1000, 0, 1000, 0),
        ..create_test_request()
    };
    assert!(create_test_preparer().prepare(&over_cropped).is_err());
}

#[tokio::test]
async fn test_submit_to_dry_run() {
    let preparer = create_test_preparer();
    let status = preparer
        .submit(DRY_RUN, &create_test_request())
        .await
        .unwrap();
    assert_eq!(status.job_id, "job-42");
    assert_eq!(status.state, JobState::Queued);

    assert!(matches!(
        preparer.submit("nope", &create_test_request()).await,
        Err(DomainError::ProviderNotFound(_))
    ));
}

#[tokio::test]
async fn test_create_returns_tracking_provider() {
    let preparer = create_test_preparer();
    let job = preparer.prepare(&create_test_request()).unwrap();

    let submission = preparer.create(DRY_RUN, &job).await.unwrap();
    assert_eq!(submission.status.state, JobState::Queued);
    assert_eq!(submission.provider.name(), DRY_RUN);

    let polled = submission.provider.status(&job.id).await.unwrap();
    assert_eq!(polled.state, JobState::Finished);
    assert!(matches!(
        submission.provider.cancel(&job.id).await,
        Err(DomainError::InvalidJob(_))
    ));
}
