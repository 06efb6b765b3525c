use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{NotificationData, NotificationKind};
use crate::features::notifications::services::NotificationService;
use crate::features::reports::models::{
    Claim, ClaimDecision, ClaimStatus, NewClaim, NewReport, NewSighting, PetReport, ReportKind,
    ReportStatus, Sighting,
};
use crate::modules::store::DocumentCollection;
use crate::shared::constants::{MAX_CLAIM_PHOTOS, MAX_REPORT_PHOTOS, MAX_SIGHTING_PHOTOS};

/// Owns report state transitions and duplicate prevention.
///
/// The status field is the only document field touched by concurrent
/// submissions, and it only ever advances, so apply-if-further-along under
/// the collection lock keeps concurrent sightings and claims safe.
pub struct ReportLifecycleService {
    lost: Arc<DocumentCollection<PetReport>>,
    found: Arc<DocumentCollection<PetReport>>,
    sightings: Arc<DocumentCollection<Sighting>>,
    claims: Arc<DocumentCollection<Claim>>,
    notifications: Arc<NotificationService>,
}

impl ReportLifecycleService {
    pub fn new(
        lost: Arc<DocumentCollection<PetReport>>,
        found: Arc<DocumentCollection<PetReport>>,
        sightings: Arc<DocumentCollection<Sighting>>,
        claims: Arc<DocumentCollection<Claim>>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            lost,
            found,
            sightings,
            claims,
            notifications,
        }
    }

    fn collection_for(&self, kind: ReportKind) -> &DocumentCollection<PetReport> {
        match kind {
            ReportKind::Lost => &self.lost,
            ReportKind::Found => &self.found,
        }
    }

    /// Look a report up across both collections.
    pub fn get_report(&self, id: Uuid) -> Result<PetReport> {
        self.lost
            .get(id)
            .or_else(|| self.found.get(id))
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Reports created by one user, newest first.
    pub fn list_by_owner(&self, owner_id: &str) -> Vec<PetReport> {
        let mut reports = self.lost.filter(|r| r.owner_id == owner_id);
        reports.extend(self.found.filter(|r| r.owner_id == owner_id));
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    pub fn sightings_for(&self, report_id: Uuid) -> Vec<Sighting> {
        let mut items = self.sightings.filter(|s| s.report_id == report_id);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub fn claims_for(&self, report_id: Uuid) -> Vec<Claim> {
        let mut items = self.claims.filter(|c| c.report_id == report_id);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    /// Duplicate-prevention check: at most one active Lost report per
    /// (owner, pet name), pet name compared case-insensitively.
    ///
    /// This is a check-then-act over the store and therefore best-effort
    /// under true concurrency; callers run it before uploading media so a
    /// rejected duplicate never leaves orphaned images behind.
    pub fn check_duplicate(&self, owner_id: &str, pet_name: &str) -> Result<()> {
        let existing = self.lost.find(|r| {
            r.owner_id == owner_id
                && !r.is_closed()
                && r.pet_name
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(pet_name))
        });

        match existing {
            Some(report) => Err(AppError::DuplicateReport(format!(
                "You already have an open lost report for {}",
                report.pet_name.as_deref().unwrap_or("this pet")
            ))),
            None => Ok(()),
        }
    }

    fn validate_new_report(input: &NewReport) -> Result<()> {
        let required = [
            ("species", &input.species),
            ("breed", &input.breed),
            ("color", &input.color),
            ("contact", &input.contact),
            ("location", &input.location_text),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }

        if input.kind == ReportKind::Lost
            && input.pet_name.as_deref().map_or(true, |n| n.trim().is_empty())
        {
            return Err(AppError::Validation(
                "pet name is required for a lost report".to_string(),
            ));
        }

        if input.photo_urls.is_empty() || input.photo_urls.len() > MAX_REPORT_PHOTOS {
            return Err(AppError::Validation(format!(
                "a report needs between 1 and {} photos",
                MAX_REPORT_PHOTOS
            )));
        }

        Ok(())
    }

    /// Create a report; status starts Open and `kind` is frozen from here on.
    pub fn create_report(&self, input: NewReport) -> Result<PetReport> {
        Self::validate_new_report(&input)?;

        if input.kind == ReportKind::Lost {
            if let Some(name) = input.pet_name.as_deref() {
                self.check_duplicate(&input.owner_id, name)?;
            }
        }

        let report = PetReport {
            id: Uuid::new_v4(),
            kind: input.kind,
            owner_id: input.owner_id,
            pet_name: input.pet_name,
            species: input.species,
            breed: input.breed,
            color: input.color,
            gender: input.gender,
            age_group: input.age_group,
            size: input.size,
            distinguishing_features: input.distinguishing_features,
            health_status: input.health_status,
            behavior: input.behavior,
            special_needs: input.special_needs,
            location_text: input.location_text,
            coordinates: input.coordinates,
            occurred_at: input.occurred_at,
            contact: input.contact,
            reward_offered: input.reward_offered,
            photo_urls: input.photo_urls,
            status: ReportStatus::Open,
            created_at: Utc::now(),
        };

        let report = self.collection_for(report.kind).insert(report);
        tracing::info!(
            "Created {} report {} for owner {}",
            report.kind,
            report.id,
            report.owner_id
        );
        Ok(report)
    }

    /// Advance a report's status, apply-if-further-along. A target at or
    /// behind the current status is a no-op; the status never moves backward.
    fn advance_status(&self, report: &PetReport, target: ReportStatus) -> Result<PetReport> {
        self.collection_for(report.kind)
            .update(report.id, |r| {
                if target.rank() > r.status.rank() {
                    r.status = target;
                }
            })
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report.id)))
    }

    fn validate_new_sighting(input: &NewSighting) -> Result<()> {
        if input.photo_urls.is_empty() || input.photo_urls.len() > MAX_SIGHTING_PHOTOS {
            return Err(AppError::Validation(format!(
                "a sighting needs between 1 and {} photos",
                MAX_SIGHTING_PHOTOS
            )));
        }
        for (field, value) in [
            ("location", &input.location_text),
            ("condition", &input.condition),
            ("contact", &input.contact),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }

    /// Record a sighting against a lost report.
    ///
    /// Advances Open -> HasSighting exactly once regardless of how many
    /// sightings arrive, and notifies the report owner.
    pub async fn record_sighting(&self, report_id: Uuid, input: NewSighting) -> Result<Sighting> {
        let report = self.get_report(report_id)?;

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
        if input.reporter_id == report.owner_id {
            return Err(AppError::Validation(
                "you cannot report a sighting of your own pet".to_string(),
            ));
        }
        Self::validate_new_sighting(&input)?;

        let sighting = self.sightings.insert(Sighting {
            id: Uuid::new_v4(),
            report_id,
            reporter_id: input.reporter_id,
            photo_urls: input.photo_urls,
            location_text: input.location_text,
            coordinates: input.coordinates,
            condition: input.condition,
            notes: input.notes,
            contact: input.contact,
            reviewed: false,
            created_at: Utc::now(),
        });

        self.advance_status(&report, ReportStatus::HasSighting)?;

        let pet = report.pet_name.as_deref().unwrap_or("your pet");
        self.notifications
            .notify(
                &report.owner_id,
                NotificationKind::Sighting,
                "New sighting reported",
                &format!("Someone reported seeing {} near {}", pet, sighting.location_text),
                NotificationData::for_sighting(report_id, sighting.id),
            )
            .await;

        tracing::info!("Recorded sighting {} for report {}", sighting.id, report_id);
        Ok(sighting)
    }

    fn validate_new_claim(input: &NewClaim) -> Result<()> {
        if input.proof_image_urls.is_empty() || input.proof_image_urls.len() > MAX_CLAIM_PHOTOS {
            return Err(AppError::Validation(format!(
                "a claim needs between 1 and {} proof images",
                MAX_CLAIM_PHOTOS
            )));
        }
        if input.contact.trim().is_empty() {
            return Err(AppError::Validation("contact is required".to_string()));
        }
        Ok(())
    }

    /// Record an ownership claim. Found reports take claims from would-be
    /// owners; a lost report takes one once the owner confirms the return.
    pub async fn record_claim(&self, report_id: Uuid, input: NewClaim) -> Result<Claim> {
        let report = self.get_report(report_id)?;

        if report.is_closed() {
            return Err(AppError::InvalidState(format!(
                "Report {} is already closed",
                report_id
            )));
        }
        if input.claimant_id == report.owner_id {
            return Err(AppError::Validation(
                "you cannot claim your own report".to_string(),
            ));
        }
        Self::validate_new_claim(&input)?;

        let claim = self.claims.insert(Claim {
            id: Uuid::new_v4(),
            report_id,
            claimant_id: input.claimant_id,
            proof_image_urls: input.proof_image_urls,
            contact: input.contact,
            additional_info: input.additional_info,
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
        });

        self.advance_status(&report, ReportStatus::Claimed)?;

        self.notifications
            .notify(
                &report.owner_id,
                NotificationKind::Claim,
                "New ownership claim",
                "Someone filed an ownership claim on your report",
                NotificationData::for_claim(report_id, claim.id),
            )
            .await;

        tracing::info!("Recorded claim {} for report {}", claim.id, report_id);
        Ok(claim)
    }

    /// Resolve a pending claim. Idempotent: re-resolving an already-resolved
    /// claim returns the stored claim unchanged, whatever the new decision.
    pub async fn resolve_claim(
        &self,
        claim_id: Uuid,
        decision: ClaimDecision,
        resolver_id: &str,
    ) -> Result<Claim> {
        let claim = self
            .claims
            .get(claim_id)
            .ok_or_else(|| AppError::NotFound(format!("Claim {} not found", claim_id)))?;

        let report = self.get_report(claim.report_id)?;
        if report.owner_id != resolver_id {
            return Err(AppError::Forbidden(
                "Only the report owner can resolve this claim".to_string(),
            ));
        }

        if claim.status != ClaimStatus::Pending {
            return Ok(claim);
        }

        let target = match decision {
            ClaimDecision::Approve => ClaimStatus::Approved,
            ClaimDecision::Reject => ClaimStatus::Rejected,
        };

        let resolved = self
            .claims
            .update(claim_id, |c| {
                if c.status == ClaimStatus::Pending {
                    c.status = target;
                }
            })
            .ok_or_else(|| AppError::NotFound(format!("Claim {} not found", claim_id)))?;

        if resolved.status == ClaimStatus::Approved {
            self.advance_status(&report, ReportStatus::Closed)?;
        }

        let outcome = match resolved.status {
            ClaimStatus::Approved => "approved",
            _ => "rejected",
        };
        self.notifications
            .notify(
                &resolved.claimant_id,
                NotificationKind::Claim,
                "Claim resolved",
                &format!("Your ownership claim was {}", outcome),
                NotificationData::for_claim(resolved.report_id, resolved.id),
            )
            .await;

        tracing::info!("Claim {} resolved: {}", claim_id, outcome);
        Ok(resolved)
    }

    /// Review a sighting (owner only). Sightings are never deleted; review
    /// only marks them as handled.
    pub fn review_sighting(
        &self,
        sighting_id: Uuid,
        reviewer_id: &str,
        _confirm: bool,
    ) -> Result<Sighting> {
        let sighting = self
            .sightings
            .get(sighting_id)
            .ok_or_else(|| AppError::NotFound(format!("Sighting {} not found", sighting_id)))?;

        let report = self.get_report(sighting.report_id)?;
        if report.owner_id != reviewer_id {
            return Err(AppError::Forbidden(
                "Only the report owner can review sightings".to_string(),
            ));
        }

        self.sightings
            .update(sighting_id, |s| s.reviewed = true)
            .ok_or_else(|| AppError::NotFound(format!("Sighting {} not found", sighting_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::services::LogNotificationGateway;
    use crate::features::reports::models::PetGender;
    use crate::features::reports::models::ReportStatus;

    fn service() -> ReportLifecycleService {
        let notifications = Arc::new(NotificationService::new(
            Arc::new(DocumentCollection::new()),
            Arc::new(LogNotificationGateway),
        ));
        ReportLifecycleService::new(
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            Arc::new(DocumentCollection::new()),
            notifications,
        )
    }

    fn lost_report(owner: &str, pet_name: &str) -> NewReport {
        NewReport {
            kind: ReportKind::Lost,
            owner_id: owner.to_string(),
            pet_name: Some(pet_name.to_string()),
            species: "dog".into(),
            breed: "beagle".into(),
            color: "tricolor".into(),
            gender: PetGender::Male,
            age_group: None,
            size: None,
            distinguishing_features: None,
            health_status: None,
            behavior: None,
            special_needs: None,
            location_text: "Central Park".into(),
            coordinates: None,
            occurred_at: Utc::now(),
            contact: "owner@example.com".into(),
            reward_offered: None,
            photo_urls: vec!["https://media.example/a.jpg".into()],
        }
    }

    fn found_report(owner: &str) -> NewReport {
        NewReport {
            kind: ReportKind::Found,
            pet_name: None,
            ..lost_report(owner, "unused")
        }
    }

    fn sighting_input(reporter: &str) -> NewSighting {
        NewSighting {
            reporter_id: reporter.to_string(),
            photo_urls: vec!["https://media.example/s.jpg".into()],
            location_text: "5th Avenue".into(),
            coordinates: None,
            condition: "looked healthy".into(),
            notes: None,
            contact: "finder@example.com".into(),
        }
    }

    fn claim_input(claimant: &str) -> NewClaim {
        NewClaim {
            claimant_id: claimant.to_string(),
            proof_image_urls: vec!["https://media.example/proof.jpg".into()],
            contact: "claimant@example.com".into(),
            additional_info: None,
        }
    }

    #[test]
    fn duplicate_lost_report_is_rejected() {
        let svc = service();
        svc.create_report(lost_report("u1", "Max")).unwrap();

        // Same owner, same pet name (case-insensitive): rejected
        let err = svc.create_report(lost_report("u1", "max")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateReport(_)));

        // Different pet name or a found report: fine
        svc.create_report(lost_report("u1", "Bella")).unwrap();
        svc.create_report(found_report("u1")).unwrap();
        // Another owner, same name: fine
        svc.create_report(lost_report("u2", "Max")).unwrap();
    }

    #[test]
    fn create_report_validates_required_fields() {
        let svc = service();
        let mut input = lost_report("u1", "Max");
        input.species = "".into();
        assert!(matches!(
            svc.create_report(input),
            Err(AppError::Validation(_))
        ));

        let mut input = lost_report("u1", "Max");
        input.photo_urls.clear();
        assert!(matches!(
            svc.create_report(input),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn sighting_advances_status_exactly_once() {
        let svc = service();
        let report = svc.create_report(lost_report("u1", "Max")).unwrap();
        assert_eq!(report.status, ReportStatus::Open);

        svc.record_sighting(report.id, sighting_input("u2"))
            .await
            .unwrap();
        assert_eq!(
            svc.get_report(report.id).unwrap().status,
            ReportStatus::HasSighting
        );

        // More sightings pile up but the status stays put
        svc.record_sighting(report.id, sighting_input("u3"))
            .await
            .unwrap();
        svc.record_sighting(report.id, sighting_input("u4"))
            .await
            .unwrap();
        assert_eq!(
            svc.get_report(report.id).unwrap().status,
            ReportStatus::HasSighting
        );
        assert_eq!(svc.sightings_for(report.id).len(), 3);
    }

    #[tokio::test]
    async fn sighting_on_closed_report_is_invalid_state() {
        let svc = service();
        let report = svc.create_report(lost_report("u1", "Max")).unwrap();
        let claim = svc
            .record_claim(report.id, claim_input("u2"))
            .await
            .unwrap();
        svc.resolve_claim(claim.id, ClaimDecision::Approve, "u1")
            .await
            .unwrap();

        let err = svc
            .record_sighting(report.id, sighting_input("u3"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn owner_cannot_sight_or_claim_their_own_report() {
        let svc = service();
        let report = svc.create_report(lost_report("u1", "Max")).unwrap();

        assert!(matches!(
            svc.record_sighting(report.id, sighting_input("u1")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.record_claim(report.id, claim_input("u1")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn approving_a_claim_closes_the_report() {
        let svc = service();
        let report = svc.create_report(found_report("finder")).unwrap();
        let claim = svc
            .record_claim(report.id, claim_input("owner"))
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(
            svc.get_report(report.id).unwrap().status,
            ReportStatus::Claimed
        );

        let resolved = svc
            .resolve_claim(claim.id, ClaimDecision::Approve, "finder")
            .await
            .unwrap();
        assert_eq!(resolved.status, ClaimStatus::Approved);
        assert_eq!(
            svc.get_report(report.id).unwrap().status,
            ReportStatus::Closed
        );
    }

    #[tokio::test]
    async fn resolve_claim_is_idempotent() {
        let svc = service();
        let report = svc.create_report(found_report("finder")).unwrap();
        let claim = svc
            .record_claim(report.id, claim_input("owner"))
            .await
            .unwrap();

        let first = svc
            .resolve_claim(claim.id, ClaimDecision::Reject, "finder")
            .await
            .unwrap();
        assert_eq!(first.status, ClaimStatus::Rejected);

        // Re-resolving (even with the opposite decision) returns the stored state
        let second = svc
            .resolve_claim(claim.id, ClaimDecision::Approve, "finder")
            .await
            .unwrap();
        assert_eq!(second.status, ClaimStatus::Rejected);
        assert_eq!(
            svc.get_report(report.id).unwrap().status,
            ReportStatus::Claimed
        );
    }

    #[tokio::test]
    async fn only_the_owner_resolves_claims() {
        let svc = service();
        let report = svc.create_report(found_report("finder")).unwrap();
        let claim = svc
            .record_claim(report.id, claim_input("owner"))
            .await
            .unwrap();

        assert!(matches!(
            svc.resolve_claim(claim.id, ClaimDecision::Approve, "owner")
                .await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_sightings_both_persist_with_one_advancement() {
        let svc = Arc::new(service());
        let report = svc.create_report(lost_report("u1", "Max")).unwrap();

        let a = {
            let svc = Arc::clone(&svc);
            let id = report.id;
            tokio::spawn(async move { svc.record_sighting(id, sighting_input("u2")).await })
        };
        let b = {
            let svc = Arc::clone(&svc);
            let id = report.id;
            tokio::spawn(async move { svc.record_sighting(id, sighting_input("u3")).await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(svc.sightings_for(report.id).len(), 2);
        assert_eq!(
            svc.get_report(report.id).unwrap().status,
            ReportStatus::HasSighting
        );
    }

    #[tokio::test]
    async fn sighting_against_found_report_is_rejected() {
        let svc = service();
        let report = svc.create_report(found_report("finder")).unwrap();

        assert!(matches!(
            svc.record_sighting(report.id, sighting_input("u2")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn review_marks_sighting_without_deleting_it() {
        let svc = service();
        let report = svc.create_report(lost_report("u1", "Max")).unwrap();
        let sighting = svc
            .record_sighting(report.id, sighting_input("u2"))
            .await
            .unwrap();

        assert!(matches!(
            svc.review_sighting(sighting.id, "u2", true),
            Err(AppError::Forbidden(_))
        ));

        let reviewed = svc.review_sighting(sighting.id, "u1", true).unwrap();
        assert!(reviewed.reviewed);
        assert_eq!(svc.sightings_for(report.id).len(), 1);
    }
}
