//! End-to-end roommate matching through the public service facade and HTTP router.
//!
//! Scenarios import a roster, edit profiles over HTTP and check the ranked match list without
//! reaching into private modules.

mod common {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use campus_nest::roommates::{
        is_opted_in_candidate, DirectoryError, RosterImporter, RoommateMatchService,
        ScoringConfig, UserDirectory, UserId, UserRecord,
    };

    #[derive(Default)]
    pub struct VecDirectory {
        records: Mutex<Vec<UserRecord>>,
    }

    impl UserDirectory for VecDirectory {
        fn insert(&self, record: UserRecord) -> Result<UserRecord, DirectoryError> {
            let mut guard = self.records.lock().expect("directory mutex poisoned");
            if guard.iter().any(|existing| existing.id == record.id) {
                return Err(DirectoryError::Conflict);
            }
            guard.push(record.clone());
            Ok(record)
        }

        fn modify(
            &self,
            id: &UserId,
            apply: &mut dyn FnMut(&mut UserRecord),
        ) -> Result<UserRecord, DirectoryError> {
            let mut guard = self.records.lock().expect("directory mutex poisoned");
            let slot = guard
                .iter_mut()
                .find(|existing| &existing.id == id)
                .ok_or(DirectoryError::NotFound)?;
            apply(slot);
            Ok(slot.clone())
        }

        fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
            let guard = self.records.lock().expect("directory mutex poisoned");
            Ok(guard.iter().find(|record| &record.id == id).cloned())
        }

        fn opted_in(&self, excluding: &UserId) -> Result<Vec<UserRecord>, DirectoryError> {
            let guard = self.records.lock().expect("directory mutex poisoned");
            Ok(guard
                .iter()
                .filter(|record| is_opted_in_candidate(record, excluding))
                .cloned()
                .collect())
        }
    }

    pub const ROSTER: &str = "\
id,name,avatar,university,major,sleep_schedule,cleanliness,noise,smoking,pets,cooking,interests,budget_min,budget_max,special_needs,bio,looking_for_roommate
lan,Lan,,X,CS,early,4,quiet,false,false,often,reading;gaming,1000000,1500000,,Early riser,true
minh,Minh,,X,EE,early,4,quiet,false,true,often,gaming;music,1200000,1600000,,Plays guitar,true
hoa,Hoa,,Y,Law,early,4,quiet,false,false,often,gaming;music,1200000,1600000,,,true
tuan,Tuan,,X,Math,late,1,social,true,false,rarely,,0,0,,,true
vy,Vy,,X,CS,,,,,,,,,,,,false
";

    pub fn seeded_service() -> Arc<RoommateMatchService<VecDirectory>> {
        let import =
            RosterImporter::from_reader(Cursor::new(ROSTER.as_bytes())).expect("roster parses");
        assert!(import.skipped.is_empty(), "unexpected skips: {:?}", import.skipped);

        let directory = Arc::new(VecDirectory::default());
        for record in import.users {
            directory.insert(record).expect("unique roster ids");
        }

        Arc::new(RoommateMatchService::new(directory, ScoringConfig::default()))
    }
}

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use campus_nest::roommates::{
    roommate_router, AuthenticatedPrincipal, MatchServiceError, UserId, PRINCIPAL_HEADER,
};
use serde_json::Value;
use tower::ServiceExt;

fn principal(id: &str) -> AuthenticatedPrincipal {
    AuthenticatedPrincipal::new(UserId::new(id))
}

#[test]
fn imported_roster_ranks_reference_scenario() {
    let service = common::seeded_service();

    let matches = service.find_matches(&principal("lan")).expect("lan is opted in");
    let ranking: Vec<(&str, u8)> = matches
        .iter()
        .map(|entry| (entry.user.id.as_str(), entry.compatibility_score))
        .collect();

    // tuan: university only (30); budget gap 1.25M earns 5
    assert_eq!(ranking, vec![("minh", 84), ("hoa", 54), ("tuan", 35)]);
    assert_eq!(
        matches[0].match_reasons,
        vec![
            "Same university".to_string(),
            "Shared interests: gaming".to_string(),
            "High compatibility".to_string(),
        ]
    );
    assert!(matches.iter().all(|entry| entry.user.id.as_str() != "vy"));
}

#[test]
fn opted_out_users_cannot_search() {
    let service = common::seeded_service();

    assert!(matches!(
        service.find_matches(&principal("vy")),
        Err(MatchServiceError::ProfileIncomplete)
    ));
}

#[tokio::test]
async fn opting_in_over_http_makes_a_user_searchable() {
    let service = common::seeded_service();
    let router = roommate_router(service.clone());

    let payload = serde_json::json!({
        "university": "X",
        "interests": ["gaming"],
        "lookingForRoommate": true,
    });
    let response = router
        .clone()
        .oneshot(
            Request::put("/api/users/roommate-profile")
                .header(header::CONTENT_TYPE, "application/json")
                .header(PRINCIPAL_HEADER, "vy")
                .body(Body::from(payload.to_string()))
                .expect("valid request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::get("/api/roommates/find")
                .header(PRINCIPAL_HEADER, "vy")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    let matches = body["matches"].as_array().expect("matches array");
    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0]["compatibilityScore"], 34);

    let lan = service
        .find_matches(&principal("lan"))
        .expect("lan still opted in");
    assert!(lan.iter().any(|entry| entry.user.id.as_str() == "vy"));
}
