use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> UserFixtures<'a> {
    pub async fn insert_user(&self, name: &str) -> Result<entity::user::Model, TestError> {
        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Inserts `count` users named `user-0`, `user-1`, ...
    pub async fn insert_users(&self, count: usize) -> Result<Vec<entity::user::Model>, TestError> {
        let mut users = Vec::with_capacity(count);
        for i in 0..count {
            users.push(self.insert_user(&format!("user-{}", i)).await?);
        }

        Ok(users)
    }
}
