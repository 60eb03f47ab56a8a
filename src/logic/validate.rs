use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{
    Activity, Client, DailyLoad, Deliverable, Estimation, Identified, Maintenance, Project,
    Resource,
};

/// Longest accepted business reference (`reference` fields).
pub const MAX_REFERENCE_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub error_type: FieldErrorType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldErrorType {
    MissingRequiredField,
    TooLong,
    InvalidValue,
    MissingReferenceId,
}

/// Presence and format checks applied at the API boundary.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// One-line summary of a list of field errors.
pub fn describe(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message.as_str()).join("; ")
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn push(&mut self, field: &str, error_type: FieldErrorType, message: String) {
        self.errors.push(FieldError {
            field: field.to_string(),
            error_type,
            message,
        });
    }

    fn required<T>(&mut self, field: &str, value: &Option<T>) {
        if value.is_none() {
            self.push(
                field,
                FieldErrorType::MissingRequiredField,
                format!("'{}' is required", field),
            );
        }
    }

    fn max_length(&mut self, field: &str, value: &Option<String>, max: usize) {
        if let Some(text) = value {
            if text.chars().count() > max {
                self.push(
                    field,
                    FieldErrorType::TooLong,
                    format!("'{}' must be at most {} characters", field, max),
                );
            }
        }
    }

    fn non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(number) = value {
            if !number.is_finite() || number < 0.0 {
                self.push(
                    field,
                    FieldErrorType::InvalidValue,
                    format!("'{}' must be a non-negative number", field),
                );
            }
        }
    }

    fn date_order(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>, end_field: &str) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.push(
                    end_field,
                    FieldErrorType::InvalidValue,
                    format!("'{}' must not precede the start date", end_field),
                );
            }
        }
    }

    fn reference<R: Identified>(&mut self, field: &str, value: &Option<R>, required: bool) {
        match value {
            Some(reference) if reference.id().is_none() => self.push(
                field,
                FieldErrorType::MissingReferenceId,
                format!("'{}' must reference an existing entity", field),
            ),
            None if required => self.required(field, value),
            _ => {}
        }
    }

    fn finish(self) -> Vec<FieldError> {
        self.errors
    }
}

impl Validate for Activity {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.required("reference", &self.reference);
        check.max_length("reference", &self.reference, MAX_REFERENCE_LENGTH);
        check.required("description", &self.description);
        check.required("startDate", &self.start_date);
        check.date_order(self.start_date, self.end_date, "endDate");
        check.finish()
    }
}

impl Validate for Client {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.required("reference", &self.reference);
        check.required("lastName", &self.last_name);
        check.required("firstName", &self.first_name);
        check.finish()
    }
}

impl Validate for DailyLoad {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.non_negative("duration", self.duration);
        check.reference("resource", &self.resource, true);
        check.finish()
    }
}

impl Validate for Deliverable {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.required("reference", &self.reference);
        check.max_length("reference", &self.reference, MAX_REFERENCE_LENGTH);
        check.required("startDate", &self.start_date);
        check.required("description", &self.description);
        check.date_order(self.start_date, self.end_date, "endDate");
        check.reference("project", &self.project, false);
        check.finish()
    }
}

impl Validate for Estimation {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.non_negative("dayValue", self.day_value);
        check.non_negative("hourValue", self.hour_value);
        check.reference("activity", &self.activity, false);
        check.reference("project", &self.project, false);
        check.reference("deliverable", &self.deliverable, false);
        check.finish()
    }
}

impl Validate for Maintenance {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.required("description", &self.description);
        check.required("startDate", &self.start_date);
        check.date_order(self.start_date, self.end_date, "endDate");
        check.non_negative("duration", self.duration);
        check.reference("resource", &self.resource, true);
        check.finish()
    }
}

impl Validate for Project {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.required("reference", &self.reference);
        check.max_length("reference", &self.reference, MAX_REFERENCE_LENGTH);
        check.required("kind", &self.kind);
        check.required("description", &self.description);
        check.required("startDate", &self.start_date);
        check.date_order(self.start_date, self.end_date, "endDate");
        check.reference("client", &self.client, true);
        check.finish()
    }
}

impl Validate for Resource {
    fn validate(&self) -> Vec<FieldError> {
        let mut check = Checker::default();
        check.required("lastName", &self.last_name);
        check.required("firstName", &self.first_name);
        check.finish()
    }
}
