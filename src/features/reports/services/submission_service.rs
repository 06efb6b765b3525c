use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::AuthenticatedUser;
use crate::features::media::dtos::ImageUpload;
use crate::features::media::services::MediaUploadService;
use crate::features::reports::dtos::{CreateClaimDto, CreateReportDto, CreateSightingDto};
use crate::features::reports::models::{Claim, PetReport, ReportKind, Sighting};
use crate::features::reports::services::ReportLifecycleService;
use crate::shared::constants::{MAX_CLAIM_PHOTOS, MAX_REPORT_PHOTOS, MAX_SIGHTING_PHOTOS};
use crate::shared::validation::validation_error;

/// Front door for user submissions.
///
/// Every submission runs the same sequence: validate the payload, run the
/// cheap store pre-checks, upload media, then persist and notify. Media is
/// uploaded only after the pre-checks pass so a rejected submission never
/// leaves orphaned images, and persistence runs on a detached task so a
/// client disconnect cannot interrupt a half-applied write.
pub struct SubmissionService {
    lifecycle: Arc<ReportLifecycleService>,
    uploads: Arc<MediaUploadService>,
}

impl SubmissionService {
    pub fn new(lifecycle: Arc<ReportLifecycleService>, uploads: Arc<MediaUploadService>) -> Self {
        Self { lifecycle, uploads }
    }

    /// Upload all images or none. One failure aborts the submission; any
    /// images that did land stay on the host but are never referenced.
    async fn upload_all(&self, photos: Vec<ImageUpload>) -> Result<Vec<String>> {
        let mut outcome = self.uploads.upload_batch(photos).await;
        if !outcome.failed.is_empty() {
            let (idx, err) = outcome.failed.remove(0);
            if !outcome.successful.is_empty() {
                tracing::warn!(
                    "Discarding {} uploaded images after photo {} failed: {}",
                    outcome.successful.len(),
                    idx,
                    err
                );
            }
            return Err(AppError::Upload(err));
        }
        Ok(outcome.urls_in_order())
    }

    fn check_photo_count(photos: &[ImageUpload], max: usize, what: &str) -> Result<()> {
        if photos.is_empty() || photos.len() > max {
            return Err(AppError::Validation(format!(
                "a {} needs between 1 and {} photos",
                what, max
            )));
        }
        Ok(())
    }

    pub async fn submit_report(
        &self,
        user: &AuthenticatedUser,
        dto: CreateReportDto,
        photos: Vec<ImageUpload>,
    ) -> Result<PetReport> {
        dto.validate().map_err(validation_error)?;
        Self::check_photo_count(&photos, MAX_REPORT_PHOTOS, "report")?;

        // Duplicate check runs before any upload
        if dto.kind == ReportKind::Lost {
            match dto.pet_name.as_deref().filter(|n| !n.trim().is_empty()) {
                Some(name) => self.lifecycle.check_duplicate(&user.user_id, name)?,
                None => {
                    return Err(AppError::Validation(
                        "pet name is required for a lost report".to_string(),
                    ))
                }
            }
        }

        let photo_urls = self.upload_all(photos).await?;
        let input = dto.into_new_report(user.user_id.clone(), photo_urls);

        let lifecycle = Arc::clone(&self.lifecycle);
        tokio::spawn(async move { lifecycle.create_report(input) })
            .await
            .map_err(|e| AppError::Internal(format!("report submission task failed: {}", e)))?
    }

    pub async fn submit_sighting(
        &self,
        user: &AuthenticatedUser,
        report_id: Uuid,
        dto: CreateSightingDto,
        photos: Vec<ImageUpload>,
    ) -> Result<Sighting> {
        dto.validate().map_err(validation_error)?;
        Self::check_photo_count(&photos, MAX_SIGHTING_PHOTOS, "sighting")?;

        // Target pre-checks before any upload; the lifecycle service
        // re-enforces all of them at persist time.
        let report = self.lifecycle.get_report(report_id)?;
        if report.kind != ReportKind::Lost {
            return Err(AppError::Validation(
                "sightings can only be filed against lost reports".to_string(),
            ));
        }
        if report.is_closed() {
            return Err(AppError::InvalidState(format!(
                "Report {} is already closed",
                report_id
            )));
        }
        if report.owner_id == user.user_id {
            return Err(AppError::Validation(
                "you cannot report a sighting of your own pet".to_string(),
            ));
        }

        let photo_urls = self.upload_all(photos).await?;
        let input = dto.into_new_sighting(user.user_id.clone(), photo_urls);

        let lifecycle = Arc::clone(&self.lifecycle);
        tokio::spawn(async move { lifecycle.record_sighting(report_id, input).await })
            .await
            .map_err(|e| AppError::Internal(format!("sighting submission task failed: {}", e)))?
    }

    pub async fn submit_claim(
        &self,
        user: &AuthenticatedUser,
        report_id: Uuid,
        dto: CreateClaimDto,
        photos: Vec<ImageUpload>,
    ) -> Result<Claim> {
        dto.validate().map_err(validation_error)?;
        Self::check_photo_count(&photos, MAX_CLAIM_PHOTOS, "claim")?;

        let report = self.lifecycle.get_report(report_id)?;
        if report.is_closed() {
            return Err(AppError::InvalidState(format!(
                "Report {} is already closed",
                report_id
            )));
        }
        if report.owner_id == user.user_id {
            return Err(AppError::Validation(
                "you cannot claim your own report".to_string(),
            ));
        }

        let proof_urls = self.upload_all(photos).await?;
        let input = dto.into_new_claim(user.user_id.clone(), proof_urls);

        let lifecycle = Arc::clone(&self.lifecycle);
        tokio::spawn(async move { lifecycle.record_claim(report_id, input).await })
            .await
            .map_err(|e| AppError::Internal(format!("claim submission task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::core::error::UploadError;
    use crate::features::notifications::services::{LogNotificationGateway, NotificationService};
    use crate::features::reports::models::{Coordinates, PetGender, ReportStatus};
    use crate::modules::storage::MediaHost;
    use crate::modules::store::DocumentCollection;

    struct StubHost {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MediaHost for StubHost {
        async fn upload(
            &self,
            filename: &str,
            _content_type: &str,
            _data: Vec<u8>,
        ) -> std::result::Result<String, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if filename.starts_with("flaky") {
                Err(UploadError::Timeout)
            } else {
                Ok(format!("https://media.example/{}", filename))
            }
        }
    }

    struct Fixture {
        host: Arc<StubHost>,
        lifecycle: Arc<ReportLifecycleService>,
        notifications: Arc<NotificationService>,
        service: SubmissionService,
    }

    fn fixture() -> Fixture {
        let host = Arc::new(StubHost {
            calls: AtomicUsize::new(0),
        });
        let notifications = Arc::new(NotificationService::new(
            Arc::new(DocumentCollection::new()),
            Arc::new(LogNotificationGateway),
        ));
        let lifecycle = Arc::new(ReportLifecycleService::new(
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            Arc::clone(&notifications),
        ));
        let uploads = Arc::new(MediaUploadService::new(
            Arc::clone(&host) as Arc<dyn MediaHost>
        ));
        let service = SubmissionService::new(Arc::clone(&lifecycle), uploads);
        Fixture {
            host,
            lifecycle,
            notifications,
            service,
        }
    }

    fn user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            email_verified: true,
        }
    }

    fn jpeg(filename: &str, size: usize) -> ImageUpload {
        ImageUpload {
            filename: filename.to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0u8; size],
        }
    }

    fn report_dto(pet_name: &str) -> CreateReportDto {
        CreateReportDto {
            kind: ReportKind::Lost,
            pet_name: Some(pet_name.to_string()),
            species: "dog".into(),
            breed: "beagle".into(),
            color: "tricolor".into(),
            gender: PetGender::Male,
            age_group: None,
            size: None,
            distinguishing_features: Some("white-tipped tail".into()),
            health_status: None,
            behavior: None,
            special_needs: None,
            location_text: "Central Park".into(),
            coordinates: Some(Coordinates {
                lat: 40.78,
                lon: -73.96,
            }),
            occurred_at: Utc::now(),
            contact: "owner@example.com".into(),
            reward_offered: None,
        }
    }

    fn sighting_dto() -> CreateSightingDto {
        CreateSightingDto {
            location_text: "5th Avenue".into(),
            coordinates: None,
            condition: "looked healthy, a little skittish".into(),
            notes: None,
            contact: "finder@example.com".into(),
        }
    }

    #[tokio::test]
    async fn lost_pet_flow_report_then_sighting_notifies_owner() {
        let fx = fixture();

        let report = fx
            .service
            .submit_report(&user("maria"), report_dto("Max"), vec![jpeg("max.jpg", 1024)])
            .await
            .unwrap();
        assert_eq!(report.status, ReportStatus::Open);
        assert_eq!(report.photo_urls, vec!["https://media.example/max.jpg"]);

        let sighting = fx
            .service
            .submit_sighting(
                &user("neighbor"),
                report.id,
                sighting_dto(),
                vec![jpeg("seen.jpg", 2048)],
            )
            .await
            .unwrap();
        assert!(!sighting.reviewed);

        assert_eq!(
            fx.lifecycle.get_report(report.id).unwrap().status,
            ReportStatus::HasSighting
        );
        let inbox = fx.notifications.list_for("maria");
        assert_eq!(inbox.len(), 1);
    }

    #[tokio::test]
    async fn oversized_photo_fails_and_retry_creates_exactly_one_sighting() {
        let fx = fixture();
        let report = fx
            .service
            .submit_report(&user("maria"), report_dto("Max"), vec![jpeg("max.jpg", 1024)])
            .await
            .unwrap();

        // 12MB photo: rejected before the host is ever contacted
        let calls_before = fx.host.calls.load(Ordering::SeqCst);
        let err = fx
            .service
            .submit_sighting(
                &user("neighbor"),
                report.id,
                sighting_dto(),
                vec![jpeg("huge.jpg", 12 * 1024 * 1024)],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Upload(UploadError::PayloadTooLarge)
        ));
        assert_eq!(fx.host.calls.load(Ordering::SeqCst), calls_before);
        assert!(fx.lifecycle.sightings_for(report.id).is_empty());
        assert_eq!(
            fx.lifecycle.get_report(report.id).unwrap().status,
            ReportStatus::Open
        );

        // Resized retry succeeds and exactly one sighting exists
        fx.service
            .submit_sighting(
                &user("neighbor"),
                report.id,
                sighting_dto(),
                vec![jpeg("resized.jpg", 2 * 1024 * 1024)],
            )
            .await
            .unwrap();
        assert_eq!(fx.lifecycle.sightings_for(report.id).len(), 1);
    }

    #[tokio::test]
    async fn one_failed_upload_aborts_the_whole_submission() {
        let fx = fixture();

        let err = fx
            .service
            .submit_report(
                &user("maria"),
                report_dto("Max"),
                vec![jpeg("ok.jpg", 512), jpeg("flaky.jpg", 512)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upload(UploadError::Timeout)));
        assert!(fx.lifecycle.list_by_owner("maria").is_empty());
    }

    #[tokio::test]
    async fn duplicate_report_is_rejected_before_any_upload() {
        let fx = fixture();
        fx.service
            .submit_report(&user("maria"), report_dto("Max"), vec![jpeg("max.jpg", 512)])
            .await
            .unwrap();

        let calls_before = fx.host.calls.load(Ordering::SeqCst);
        let err = fx
            .service
            .submit_report(&user("maria"), report_dto("max"), vec![jpeg("again.jpg", 512)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateReport(_)));
        assert_eq!(fx.host.calls.load(Ordering::SeqCst), calls_before);
    }

    #[tokio::test]
    async fn sighting_against_closed_report_skips_uploads() {
        let fx = fixture();
        let report = fx
            .service
            .submit_report(&user("maria"), report_dto("Max"), vec![jpeg("max.jpg", 512)])
            .await
            .unwrap();
        let claim = fx
            .service
            .submit_claim(
                &user("finder"),
                report.id,
                CreateClaimDto {
                    contact: "finder@example.com".into(),
                    additional_info: None,
                },
                vec![jpeg("proof.jpg", 512)],
            )
            .await
            .unwrap();
        fx.lifecycle
            .resolve_claim(claim.id, crate::features::reports::models::ClaimDecision::Approve, "maria")
            .await
            .unwrap();

        let calls_before = fx.host.calls.load(Ordering::SeqCst);
        let err = fx
            .service
            .submit_sighting(
                &user("neighbor"),
                report.id,
                sighting_dto(),
                vec![jpeg("late.jpg", 512)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert_eq!(fx.host.calls.load(Ordering::SeqCst), calls_before);
    }

    #[tokio::test]
    async fn sighting_submission_reaches_the_owner_feed_in_one_emission() {
        use crate::features::feed::models::{EnrichedFeedItem, FeedEvent};
        use crate::features::feed::services::{
            CollectionReportSource, FeedAggregator, FeedSubscription,
        };
        use crate::features::users::services::{IdentityResolver, StoreUserDirectory};

        async fn next_items(sub: &mut FeedSubscription) -> Vec<EnrichedFeedItem> {
            loop {
                match sub.next_event().await.expect("subscription ended") {
                    FeedEvent::Items { items } => return items,
                    FeedEvent::SourceError { .. } => continue,
                }
            }
        }

        let lost = Arc::new(DocumentCollection::new());
        let found = Arc::new(DocumentCollection::new());
        let notifications = Arc::new(NotificationService::new(
            Arc::new(DocumentCollection::new()),
            Arc::new(LogNotificationGateway),
        ));
        let lifecycle = Arc::new(ReportLifecycleService::new(
            Arc::clone(&lost),
            Arc::clone(&found),
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            notifications,
        ));
        let service = SubmissionService::new(
            Arc::clone(&lifecycle),
            Arc::new(MediaUploadService::new(Arc::new(StubHost {
                calls: AtomicUsize::new(0),
            }))),
        );
        let aggregator = FeedAggregator::new(
            Arc::new(CollectionReportSource::new(Arc::clone(&lost))),
            Arc::new(CollectionReportSource::new(Arc::clone(&found))),
            Arc::new(IdentityResolver::new(Arc::new(StoreUserDirectory::new(
                Arc::new(DocumentCollection::new()),
            )))),
        );

        let report = service
            .submit_report(&user("maria"), report_dto("Max"), vec![jpeg("max.jpg", 512)])
            .await
            .unwrap();

        // The owner subscribes; both sources deliver their current snapshot
        let mut sub = aggregator.subscribe("maria".into());
        let _ = next_items(&mut sub).await;
        let items = next_items(&mut sub).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].report.status, ReportStatus::Open);
        assert_eq!(items[0].display_name, "You");

        service
            .submit_sighting(
                &user("neighbor"),
                report.id,
                sighting_dto(),
                vec![jpeg("seen.jpg", 512)],
            )
            .await
            .unwrap();

        // The status advancement arrives in the very next emission
        let items = next_items(&mut sub).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].report.status, ReportStatus::HasSighting);
        assert_eq!(items[0].display_name, "You");
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_host() {
        let fx = fixture();
        let mut dto = report_dto("Max");
        dto.contact = "not a contact".into();

        let err = fx
            .service
            .submit_report(&user("maria"), dto, vec![jpeg("max.jpg", 512)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(fx.host.calls.load(Ordering::SeqCst), 0);
    }
}
