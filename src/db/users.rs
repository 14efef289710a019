use std::{collections::BTreeSet, fmt, str::FromStr};

use anyhow::anyhow;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Permission labels stored in `user_roles`. Registration only grants `User`;
/// `Admin` is reserved for accounts promoted by hand and is shown on sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        use Role::*;
        match self {
            User => "USER",
            Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(anyhow!("unknown role {s:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Encoded password, see [`crate::auth::password`].
    pub password: String,
    pub active: bool,
    pub roles: BTreeSet<Role>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub active: bool,
    pub roles: BTreeSet<Role>,
}

pub async fn find_by_username(db_pool: &SqlitePool, username: &str) -> anyhow::Result<Option<User>> {
    let Some((id, username, password, active)): Option<(String, String, String, bool)> =
        sqlx::query_as("SELECT id,username,password,active FROM users WHERE username=?")
            .bind(username)
            .fetch_optional(db_pool)
            .await?
    else {
        return Ok(None);
    };

    let roles = sqlx::query_as::<_, (String,)>("SELECT role FROM user_roles WHERE user_id=?")
        .bind(&id)
        .fetch_all(db_pool)
        .await?
        .into_iter()
        .map(|(role,)| role.parse())
        .collect::<anyhow::Result<BTreeSet<Role>>>()?;

    Ok(Some(User {
        id: Uuid::parse_str(&id)?,
        username,
        password,
        active,
        roles,
    }))
}

/// Inserts the user and its roles. Returns `None` when the username is already taken.
pub async fn save(db_pool: &SqlitePool, user: NewUser) -> anyhow::Result<Option<User>> {
    let id = Uuid::now_v7();
    let mut tx = db_pool.begin().await?;

    let inserted = sqlx::query("INSERT INTO users (id,username,password,active) VALUES (?,?,?,?)")
        .bind(id.to_string())
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.active)
        .execute(&mut *tx)
        .await;
    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    for role in &user.roles {
        sqlx::query("INSERT INTO user_roles (user_id,role) VALUES (?,?)")
            .bind(id.to_string())
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(Some(User {
        id,
        username: user.username,
        password: user.password,
        active: user.active,
        roles: user.roles,
    }))
}
