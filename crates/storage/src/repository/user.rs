use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::user::UserRow;
use crate::models::{Cpf, User};

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by normalized CPF
    pub async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT cpf, name, email, role, birth_date, gender, pcd
            FROM users
            WHERE cpf = ?
            "#,
        )
        .bind(cpf.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Register a user (athlete or organizer)
    pub async fn create(&self, user: &User) -> Result<()> {
        let (email, birth_date, gender, pcd) = match user {
            User::Athlete(a) => (
                a.email.as_str(),
                Some(a.birth_date.as_str()),
                Some(a.gender.as_str()),
                a.pcd,
            ),
            User::Organizer(o) => (o.email.as_str(), None, None, false),
        };

        sqlx::query(
            r#"
            INSERT INTO users (cpf, name, email, role, birth_date, gender, pcd)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.cpf().as_str())
        .bind(user.name())
        .bind(email)
        .bind(user.role())
        .bind(birth_date)
        .bind(gender)
        .bind(pcd)
        .execute(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::ConstraintViolation(format!(
                    "a user with CPF {} or email {} already exists",
                    user.cpf(),
                    email
                ))
            } else {
                e
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::user::ROLE_ORGANIZER;
    use crate::models::{Athlete, Organizer};

    fn athlete(cpf: &str, email: &str) -> User {
        User::Athlete(Athlete {
            cpf: Cpf::parse(cpf).unwrap(),
            name: "Maria Souza".to_string(),
            email: email.to_string(),
            birth_date: "12/03/1990".to_string(),
            gender: "Feminino".to_string(),
            pcd: false,
        })
    }

    #[tokio::test]
    async fn test_create_and_find_users() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let maria = athlete("111.444.777-35", "maria@example.com");
        let organizer = User::Organizer(Organizer {
            cpf: Cpf::parse("52998224725").unwrap(),
            name: "Org".to_string(),
            email: "org@example.com".to_string(),
        });
        repo.create(&maria).await.unwrap();
        repo.create(&organizer).await.unwrap();

        assert_eq!(repo.find_by_cpf(maria.cpf()).await.unwrap(), Some(maria));
        assert_eq!(
            repo.find_by_cpf(organizer.cpf()).await.unwrap().unwrap().role(),
            ROLE_ORGANIZER
        );
    }

    #[tokio::test]
    async fn test_unknown_cpf_is_none() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let found = repo
            .find_by_cpf(&Cpf::parse("11144477735").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_is_a_constraint_violation() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&athlete("11144477735", "a@example.com")).await.unwrap();
        let err = repo
            .create(&athlete("11144477735", "b@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }
}
