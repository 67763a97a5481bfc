use crate::database::DbError;
use crate::database::app_user::{User, UserRole, UserWithPassword};
use sqlx::{Executor, Postgres};

const USER_COLUMNS: &str = "id, created_at, updated_at, email, name, role";

pub struct UserStore;

impl UserStore {
    //================================================================================
    // Core User Management (CRUD)
    //================================================================================

    /// Creates a new user.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
        role: UserRole,
    ) -> Result<User, DbError> {
        let sql = format!(
            r"
            INSERT INTO app_user (email, name, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(name)
            .bind(hashed_password)
            .bind(role)
            .fetch_one(executor)
            .await?)
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_email(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE email = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS}, password FROM app_user WHERE email = $1");
        Ok(sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(email)
            .fetch_optional(executor)
            .await?)
    }

    /// Retrieves just the role for a specific user ID.
    pub async fn get_user_role(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<UserRole>, DbError> {
        Ok(
            sqlx::query_scalar::<_, UserRole>("SELECT role FROM app_user WHERE id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    //================================================================================
    // Utilities
    //================================================================================

    pub async fn any_user_exists(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM app_user)")
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn count_by_role(
        executor: impl Executor<'_, Database = Postgres>,
        role: UserRole,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_user WHERE role = $1")
                .bind(role)
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn list_users(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user ORDER BY id");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(executor).await?)
    }
}
