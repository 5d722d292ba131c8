use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait};
use uuid::Uuid;

use super::common::utils::get_object;
use super::common::{BaseApi, Resource};
use crate::entity::user;
use crate::error::ApiResult;
use crate::models::{CreateUser, UpdateUser, User};

pub struct Users;

#[async_trait]
impl Resource for Users {
    type Entity = user::Entity;
    type Model = user::Model;
    type ActiveModel = user::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = User;
    type Create = CreateUser;
    type Update = UpdateUser;
    type Key = String;

    fn primary_key(obj: &User) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(user::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateUser) -> String {
        data.username.clone()
    }

    fn model_key(model: &user::Model) -> String {
        model.username.clone()
    }

    fn key_condition(keys: &[String]) -> Condition {
        Condition::all().add(user::Column::Username.is_in(keys.iter().map(String::as_str)))
    }

    fn key_columns() -> Vec<user::Column> {
        vec![user::Column::Username]
    }
}

pub type UserApi = BaseApi<Users>;

impl UserApi {
    pub async fn get_by_username<C>(&self, db: &C, username: &str) -> ApiResult<User>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<user::Entity, C>(
            db,
            Condition::all().add(user::Column::Username.eq(username)),
        )
        .await?;
        Ok(self.schema(model))
    }
}
