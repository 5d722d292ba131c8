use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::api::common::UpdateSchema;
use crate::entity::feature_name;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureName {
    pub id: i32,
    pub name: String,
    pub created_on: DateTime<Utc>,
}

/// A named numeric value attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeatureName {
    pub name: String,
}

impl CreateFeatureName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateFeatureName {
    pub name: Option<String>,
}

impl From<feature_name::Model> for FeatureName {
    fn from(m: feature_name::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_on: m.created_on,
        }
    }
}

impl From<(feature_name::Model, f64)> for Feature {
    fn from((name, value): (feature_name::Model, f64)) -> Self {
        Self {
            name: name.name,
            value,
        }
    }
}

impl IntoActiveModel<feature_name::ActiveModel> for CreateFeatureName {
    fn into_active_model(self) -> feature_name::ActiveModel {
        feature_name::ActiveModel {
            name: Set(self.name),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<feature_name::ActiveModel> for UpdateFeatureName {
    fn apply(self, active: &mut feature_name::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
    }
}
