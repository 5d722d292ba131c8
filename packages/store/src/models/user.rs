use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::double_option;
use crate::api::common::UpdateSchema;
use crate::entity::user;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl CreateUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            username: username.into(),
            email: None,
            name: None,
            is_superuser: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateUser {
    pub username: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            username: m.username,
            email: m.email,
            name: m.name,
            is_active: m.is_active,
            is_superuser: m.is_superuser,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<user::ActiveModel> for CreateUser {
    fn into_active_model(self) -> user::ActiveModel {
        user::ActiveModel {
            uuid: Set(self.uuid),
            username: Set(self.username),
            email: Set(self.email),
            name: Set(self.name),
            is_active: Set(true),
            is_superuser: Set(self.is_superuser),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<user::ActiveModel> for UpdateUser {
    fn apply(self, active: &mut user::ActiveModel) {
        if let Some(username) = self.username {
            active.username = Set(username);
        }
        if let Some(email) = self.email {
            active.email = Set(email);
        }
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(is_active) = self.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_superuser) = self.is_superuser {
            active.is_superuser = Set(is_superuser);
        }
    }
}
