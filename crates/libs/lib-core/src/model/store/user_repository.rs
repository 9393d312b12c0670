//! # User Repository
//!
//! Profiles, point balances and the admin flag.
//!
//! Balance changes are single conditional `UPDATE`s so a debit can never
//! drive a balance negative, even under concurrent settlement.

use super::models::{User, UserForCreate};
use super::DbPool;
use crate::error::{AppError, Result};
use lib_utils::now_utc;
use sqlx::{query_as, Executor, Sqlite};

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by id, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, id: i64) -> Result<User> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Find a user by their email address.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Insert a new user.
    ///
    /// A duplicate email surfaces as `AppError::Conflict`.
    pub async fn create(pool: &DbPool, data: UserForCreate) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, points, is_admin, location, avatar, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.points)
        .bind(data.is_admin)
        .bind(&data.location)
        .bind(&data.avatar)
        .bind(now_utc())
        .execute(pool)
        .await?;

        Self::get(pool, result.last_insert_rowid()).await
    }

    /// All users, newest first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<User>> {
        let users = query_as::<_, User>("SELECT * FROM users ORDER BY id DESC")
            .fetch_all(pool)
            .await?;
        Ok(users)
    }

    /// Flip the admin flag and return the updated user.
    pub async fn toggle_admin(pool: &DbPool, id: i64) -> Result<User> {
        let result = sqlx::query("UPDATE users SET is_admin = NOT is_admin WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Self::get(pool, id).await
    }

    /// Overwrite the admin flag.
    pub async fn set_admin(pool: &DbPool, id: i64, is_admin: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(is_admin)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the point balance.
    pub async fn set_points(pool: &DbPool, id: i64, points: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET points = ? WHERE id = ?")
            .bind(points)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Subtract `amount` only if the balance covers it.
    ///
    /// Returns `false` when the user is missing or the balance is too low.
    pub async fn debit_points<'e, E>(executor: E, id: i64, amount: i64) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE users SET points = points - ? WHERE id = ? AND points >= ?")
            .bind(amount)
            .bind(id)
            .bind(amount)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add `amount` to the balance. Returns `false` when the user is missing.
    pub async fn credit_points<'e, E>(executor: E, id: i64, amount: i64) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(amount)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64> {
        let (count,): (i64,) = query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::create_memory_pool;

    async fn setup_test_db() -> DbPool {
        create_memory_pool()
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = setup_test_db().await;

        let user = UserRepository::create(
            &pool,
            UserForCreate::new("Alice", "alice@example.com").points(100),
        )
        .await
        .expect("Failed to create user");

        assert_eq!(user.name, "Alice");
        assert_eq!(user.points, 100);
        assert!(!user.is_admin);

        let found = UserRepository::find_by_email(&pool, "alice@example.com")
            .await
            .unwrap()
            .expect("User should exist");
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let pool = setup_test_db().await;

        UserRepository::create(&pool, UserForCreate::new("Alice", "alice@example.com"))
            .await
            .unwrap();
        let err = UserRepository::create(&pool, UserForCreate::new("Alias", "alice@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_debit_never_goes_negative() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, UserForCreate::new("Bob", "bob@example.com").points(30))
            .await
            .unwrap();

        assert!(!UserRepository::debit_points(&pool, user.id, 50).await.unwrap());
        assert_eq!(UserRepository::get(&pool, user.id).await.unwrap().points, 30);

        assert!(UserRepository::debit_points(&pool, user.id, 30).await.unwrap());
        assert_eq!(UserRepository::get(&pool, user.id).await.unwrap().points, 0);

        assert!(UserRepository::credit_points(&pool, user.id, 5).await.unwrap());
        assert_eq!(UserRepository::get(&pool, user.id).await.unwrap().points, 5);
    }

    #[tokio::test]
    async fn test_toggle_admin() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, UserForCreate::new("Cleo", "cleo@example.com"))
            .await
            .unwrap();

        let toggled = UserRepository::toggle_admin(&pool, user.id).await.unwrap();
        assert!(toggled.is_admin);
        let toggled = UserRepository::toggle_admin(&pool, user.id).await.unwrap();
        assert!(!toggled.is_admin);

        let err = UserRepository::toggle_admin(&pool, 999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let pool = setup_test_db().await;
        for (name, email) in [("A", "a@x.io"), ("B", "b@x.io"), ("C", "c@x.io")] {
            UserRepository::create(&pool, UserForCreate::new(name, email))
                .await
                .unwrap();
        }

        let names: Vec<String> = UserRepository::list_all(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        assert_eq!(UserRepository::count(&pool).await.unwrap(), 3);
    }
}
