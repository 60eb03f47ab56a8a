//! Canonical entity values for tests: one set per entity, each a fresh value.
//!
//! `with_required_data` fills the fields the validator requires (relationships
//! excepted), `with_partial_data` some optional ones too, `with_full_data`
//! every scalar field and `with_new_data` is an unsaved draft.

use chrono::NaiveDate;

fn day(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 1, day)
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub mod activity {
    use super::{day, text};
    use crate::model::{Activity, Status};

    pub fn with_required_data() -> Activity {
        Activity {
            id: Some(20271),
            reference: text("Gorgeous"),
            description: text("Handcrafted"),
            start_date: day(26),
            end_date: None,
            remaining_work: None,
            status: None,
        }
    }

    pub fn with_partial_data() -> Activity {
        Activity {
            id: Some(5748),
            reference: text("Generic standardizat"),
            description: text("Pants magenta"),
            start_date: day(25),
            end_date: day(26),
            ..with_required_data()
        }
    }

    pub fn with_full_data() -> Activity {
        Activity {
            id: Some(56304),
            reference: text("bypassing"),
            description: text("benchmark system Timor-Leste"),
            start_date: day(26),
            end_date: day(26),
            remaining_work: text("tan"),
            status: Some(Status::Done),
        }
    }

    pub fn with_new_data() -> Activity {
        Activity {
            id: None,
            reference: text("Nepalese black"),
            description: text("bricks-and-clicks Infrastructure"),
            start_date: day(25),
            ..with_required_data()
        }
    }
}

pub mod client {
    use super::text;
    use crate::model::Client;

    pub fn with_required_data() -> Client {
        Client {
            id: Some(71655),
            reference: text("hacking"),
            last_name: text("primary Virginia Concrete"),
            first_name: text("asynchronous Account Future"),
            contact: None,
        }
    }

    pub fn with_partial_data() -> Client {
        Client {
            id: Some(23980),
            reference: text("Devolved Washington"),
            last_name: text("card Reverse-engineered analyzing"),
            first_name: text("Som"),
            contact: None,
        }
    }

    pub fn with_full_data() -> Client {
        Client {
            id: Some(40065),
            reference: text("Facilitator"),
            last_name: text("seamless initiatives"),
            first_name: text("auxiliary Drive yellow"),
            contact: text("copy contextually-based azure"),
        }
    }

    pub fn with_new_data() -> Client {
        Client {
            id: None,
            reference: text("Portugal JSON parse"),
            last_name: text("connect"),
            first_name: text("EXE Illinois Vatu"),
            contact: None,
        }
    }
}

pub mod daily_load {
    use super::{day, text};
    use crate::model::{DailyLoad, Entity, LoadKind};
    use uuid::uuid;

    pub fn with_required_data() -> DailyLoad {
        DailyLoad {
            id: Some(uuid!("dc2ffd79-9705-4275-9b3b-1852069a4ee9")),
            ..DailyLoad::draft()
        }
    }

    pub fn with_partial_data() -> DailyLoad {
        DailyLoad {
            id: Some(uuid!("912bdd28-8caf-4319-b7be-c1358741949d")),
            date: day(25),
            ..DailyLoad::draft()
        }
    }

    pub fn with_full_data() -> DailyLoad {
        DailyLoad {
            id: Some(uuid!("173a67e3-b2b3-46e6-af8b-67d38dd82ac5")),
            date: day(25),
            kind: Some(LoadKind::Support),
            duration: Some(76993.0),
            description: text("primary AGP"),
            resource: None,
        }
    }

    pub fn with_new_data() -> DailyLoad {
        DailyLoad::draft()
    }
}

pub mod deliverable {
    use super::{day, text};
    use crate::model::{Deliverable, Status};

    pub fn with_required_data() -> Deliverable {
        Deliverable {
            id: Some(96229),
            reference: text("Data Directives Rubb"),
            start_date: day(26),
            end_date: None,
            description: text("yellow"),
            status: None,
            project: None,
        }
    }

    pub fn with_partial_data() -> Deliverable {
        Deliverable {
            id: Some(86756),
            reference: text("Administrator Rubber"),
            start_date: day(25),
            description: text("Senior Garden"),
            status: Some(Status::InProgress),
            ..with_required_data()
        }
    }

    pub fn with_full_data() -> Deliverable {
        Deliverable {
            id: Some(91247),
            reference: text("Direct"),
            start_date: day(25),
            end_date: day(25),
            description: text("Wooden payment"),
            status: Some(Status::Done),
            project: None,
        }
    }

    pub fn with_new_data() -> Deliverable {
        Deliverable {
            id: None,
            reference: text("website"),
            start_date: day(25),
            description: text("National Licensed"),
            ..with_required_data()
        }
    }
}

pub mod estimation {
    use super::day;
    use crate::model::{Entity, Estimation, EstimationTarget};
    use uuid::uuid;

    pub fn with_required_data() -> Estimation {
        Estimation {
            id: Some(uuid!("3a83931e-1016-449f-8c68-e7ae645ed49e")),
            ..Estimation::draft()
        }
    }

    pub fn with_partial_data() -> Estimation {
        Estimation {
            id: Some(uuid!("b5c3e4b8-4d9f-4aef-b317-7935bb635d6d")),
            day_value: Some(62492.0),
            taken_over: Some(false),
            target: Some(EstimationTarget::Project),
            ..Estimation::draft()
        }
    }

    pub fn with_full_data() -> Estimation {
        Estimation {
            id: Some(uuid!("970defa5-8759-454a-88df-2f3ce4849f56")),
            date: day(25),
            day_value: Some(90336.0),
            hour_value: Some(7250.0),
            taken_over: Some(false),
            target: Some(EstimationTarget::Activity),
            ..Estimation::draft()
        }
    }

    pub fn with_new_data() -> Estimation {
        Estimation::draft()
    }
}

pub mod maintenance {
    use super::{day, text};
    use crate::model::{Entity, Maintenance, Status};
    use uuid::uuid;

    pub fn with_required_data() -> Maintenance {
        Maintenance {
            id: Some(uuid!("a3dd5506-2f11-4080-a3b1-28ee65334a39")),
            description: text("Greece"),
            start_date: day(26),
            ..Maintenance::draft()
        }
    }

    pub fn with_partial_data() -> Maintenance {
        Maintenance {
            id: Some(uuid!("e5d49800-63d0-4ec1-b723-6bb58343617f")),
            description: text("PNG Cross-group"),
            product: text("Cambridgeshire"),
            solution: text("Integration Bike"),
            status: Some(Status::Done),
            start_date: day(25),
            end_date: day(25),
            duration: Some(80418.0),
            resource: None,
        }
    }

    pub fn with_full_data() -> Maintenance {
        Maintenance {
            id: Some(uuid!("65968d5e-d71a-4fa5-a4cb-b77ff66e1ad5")),
            description: text("Future array bus"),
            product: text("deposit"),
            solution: text("Extension blockchains azure"),
            status: Some(Status::InProgress),
            start_date: day(25),
            end_date: day(25),
            duration: Some(97153.0),
            resource: None,
        }
    }

    pub fn with_new_data() -> Maintenance {
        Maintenance {
            id: None,
            description: text("Kentucky deposit wireless"),
            start_date: day(25),
            ..Maintenance::draft()
        }
    }
}

pub mod project {
    use super::{day, text};
    use crate::model::{Project, ProjectKind, Status};

    pub fn with_required_data() -> Project {
        Project {
            id: Some(59803),
            reference: text("Communications inter"),
            kind: Some(ProjectKind::Internal),
            description: text("Account"),
            start_date: day(26),
            end_date: None,
            status: None,
            client: None,
        }
    }

    pub fn with_partial_data() -> Project {
        Project {
            id: Some(92611),
            reference: text("IB"),
            description: text("Kids white Account"),
            status: Some(Status::Planned),
            ..with_required_data()
        }
    }

    pub fn with_full_data() -> Project {
        Project {
            id: Some(68792),
            reference: text("optical deposit band"),
            kind: Some(ProjectKind::External),
            description: text("parsing Berkshire cultivate"),
            start_date: day(25),
            end_date: day(26),
            status: Some(Status::Done),
            client: None,
        }
    }

    pub fn with_new_data() -> Project {
        Project {
            id: None,
            reference: text("wireless"),
            description: text("orchid Creative program"),
            start_date: day(25),
            ..with_required_data()
        }
    }
}

pub mod resource {
    use super::text;
    use crate::model::Resource;
    use uuid::uuid;

    pub fn with_required_data() -> Resource {
        Resource {
            id: Some(uuid!("c78bae1d-286a-41fb-8b0b-798bcbc837e0")),
            last_name: text("AI compressing Prairie"),
            first_name: text("HDD"),
        }
    }

    pub fn with_partial_data() -> Resource {
        Resource {
            id: Some(uuid!("581dde19-78ea-4804-8ac2-bebc8c7862ae")),
            last_name: text("clicks-and-mortar Factors 4th"),
            first_name: text("Account"),
        }
    }

    pub fn with_full_data() -> Resource {
        Resource {
            id: Some(uuid!("74b6a3c3-160e-4888-a002-1618a2573ca6")),
            last_name: text("systemic Licensed"),
            first_name: text("matrix auxiliary transmitting"),
        }
    }

    pub fn with_new_data() -> Resource {
        Resource::new("bypassing", "technologies revolutionize Licensed")
    }
}
