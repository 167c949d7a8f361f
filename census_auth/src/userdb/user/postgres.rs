use sqlx::{Pool, Postgres};

use crate::storage::{DB_TABLE_USER_EMAILS, DB_TABLE_USERS};
use crate::userdb::{UserRow, errors::UserError, types::User};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();
    let emails_table = DB_TABLE_USER_EMAILS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {users_table} (
            id TEXT PRIMARY KEY NOT NULL,
            anonymous BOOLEAN NOT NULL,
            emails TEXT NOT NULL,
            first_name TEXT,
            last_name TEXT,
            home_page TEXT,
            providers TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    // The UNIQUE email column makes concurrent first-time logins for the same
    // address fail on the second insert instead of creating duplicate users.
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {emails_table} (
            email TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_user_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<User>, UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        SELECT * FROM {users_table} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    row.map(User::try_from).transpose()
}

pub(super) async fn find_user_by_any_email_postgres(
    pool: &Pool<Postgres>,
    emails: &[String],
) -> Result<Option<User>, UserError> {
    let users_table = DB_TABLE_USERS.as_str();
    let emails_table = DB_TABLE_USER_EMAILS.as_str();

    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        SELECT u.* FROM {users_table} u
        WHERE u.id IN (SELECT user_id FROM {emails_table} WHERE email = ANY($1))
        LIMIT 1
        "#
    ))
    .bind(emails)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    row.map(User::try_from).transpose()
}

pub(super) async fn upsert_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let users_table = DB_TABLE_USERS.as_str();
    let emails_table = DB_TABLE_USER_EMAILS.as_str();

    let emails_json = user.emails_json()?;
    let providers_json = user.providers_json()?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        INSERT INTO {users_table}
            (id, anonymous, emails, first_name, last_name, home_page, providers, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (id) DO UPDATE SET
            anonymous = EXCLUDED.anonymous,
            emails = EXCLUDED.emails,
            first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            home_page = EXCLUDED.home_page,
            providers = EXCLUDED.providers,
            updated_at = EXCLUDED.updated_at
        "#
    ))
    .bind(&user.id)
    .bind(user.anonymous)
    .bind(&emails_json)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.home_page)
    .bind(&providers_json)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    // Rebuild this user's email index rows; a conflict here can only come
    // from an address already owned by a different user.
    sqlx::query(&format!(
        r#"
        DELETE FROM {emails_table} WHERE user_id = $1
        "#
    ))
    .bind(&user.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    for email in &user.emails {
        sqlx::query(&format!(
            r#"
            INSERT INTO {emails_table} (email, user_id) VALUES ($1, $2)
            "#
        ))
        .bind(email.as_str())
        .bind(&user.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(user)
}

pub(super) async fn delete_user_postgres(pool: &Pool<Postgres>, id: &str) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();
    let emails_table = DB_TABLE_USER_EMAILS.as_str();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        DELETE FROM {emails_table} WHERE user_id = $1
        "#
    ))
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        DELETE FROM {users_table} WHERE id = $1
        "#
    ))
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    tx.commit()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}
