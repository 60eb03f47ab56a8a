use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::{
    Activity, Client, DailyLoad, Deliverable, Entity, Estimation, EstimationTarget, LoadKind,
    Maintenance, Project, ProjectKind, Referenceable, Resource, Status,
};
use crate::store::traits::{EntityStore, Store};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("Invalid seed date {}-{}-{}", year, month, day))
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Write a small connected demo dataset: two resources working for two
/// clients' projects, with their deliverables, loads and estimations.
pub async fn load_seed_data<S: Store + ?Sized>(store: &S) -> Result<()> {
    let lea = EntityStore::<Resource>::save(store, Resource::new("Durand", "Lea")).await?;
    let omar = EntityStore::<Resource>::save(store, Resource::new("Benali", "Omar")).await?;

    let acme = EntityStore::<Client>::save(
        store,
        Client {
            reference: text("ACME"),
            last_name: text("Martin"),
            first_name: text("Claire"),
            contact: text("claire.martin@acme.example"),
            ..Client::draft()
        },
    )
    .await?;
    let globex = EntityStore::<Client>::save(
        store,
        Client {
            reference: text("GLOBEX"),
            last_name: text("Petit"),
            first_name: text("Hugo"),
            ..Client::draft()
        },
    )
    .await?;

    let portal = EntityStore::<Project>::save(
        store,
        Project {
            reference: text("PRJ-PORTAL"),
            kind: Some(ProjectKind::External),
            description: text("Customer self-service portal"),
            start_date: Some(date(2023, 1, 9)?),
            end_date: Some(date(2023, 6, 30)?),
            status: Some(Status::InProgress),
            client: Some(acme.to_reference()),
            ..Project::draft()
        },
    )
    .await?;
    let tooling = EntityStore::<Project>::save(
        store,
        Project {
            reference: text("PRJ-TOOLS"),
            kind: Some(ProjectKind::Internal),
            description: text("Internal build tooling"),
            start_date: Some(date(2023, 2, 1)?),
            status: Some(Status::Planned),
            client: Some(globex.to_reference()),
            ..Project::draft()
        },
    )
    .await?;

    let mockups = EntityStore::<Deliverable>::save(
        store,
        Deliverable {
            reference: text("LIV-MOCKUPS"),
            start_date: Some(date(2023, 1, 9)?),
            end_date: Some(date(2023, 2, 3)?),
            description: text("Portal mockups"),
            status: Some(Status::Done),
            project: Some(portal.to_reference()),
            ..Deliverable::draft()
        },
    )
    .await?;

    let review = EntityStore::<Activity>::save(
        store,
        Activity {
            reference: text("ACT-REVIEW"),
            description: text("Code review"),
            start_date: Some(date(2023, 1, 16)?),
            remaining_work: text("2d"),
            status: Some(Status::InProgress),
            ..Activity::draft()
        },
    )
    .await?;

    for (resource, day, hours, kind) in [
        (&lea, 16, 7.5, LoadKind::Project),
        (&lea, 17, 4.0, LoadKind::Support),
        (&omar, 16, 6.0, LoadKind::Maintenance),
    ] {
        EntityStore::<DailyLoad>::save(
            store,
            DailyLoad {
                date: Some(date(2023, 1, day)?),
                kind: Some(kind),
                duration: Some(hours),
                resource: Some(resource.to_reference()),
                ..DailyLoad::draft()
            },
        )
        .await?;
    }

    EntityStore::<Maintenance>::save(
        store,
        Maintenance {
            description: text("Login page times out"),
            product: text("Portal"),
            solution: text("Raise session timeout"),
            status: Some(Status::Done),
            start_date: Some(date(2023, 1, 18)?),
            end_date: Some(date(2023, 1, 18)?),
            duration: Some(2.0),
            resource: Some(omar.to_reference()),
            ..Maintenance::draft()
        },
    )
    .await?;

    for estimation in [
        Estimation {
            date: Some(date(2023, 1, 5)?),
            day_value: Some(40.0),
            target: Some(EstimationTarget::Project),
            project: Some(portal.to_reference()),
            ..Estimation::draft()
        },
        Estimation {
            date: Some(date(2023, 1, 5)?),
            day_value: Some(5.0),
            hour_value: Some(37.5),
            taken_over: Some(true),
            target: Some(EstimationTarget::Deliverable),
            deliverable: Some(mockups.to_reference()),
            ..Estimation::draft()
        },
        Estimation {
            hour_value: Some(12.0),
            target: Some(EstimationTarget::Activity),
            activity: Some(review.to_reference()),
            project: Some(tooling.to_reference()),
            ..Estimation::draft()
        },
    ] {
        EntityStore::<Estimation>::save(store, estimation).await?;
    }

    log::info!("Seed data loaded: 2 resources, 2 clients, 2 projects");
    Ok(())
}
