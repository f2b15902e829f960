use std::sync::Arc;

use super::breeds::BreedCatalog;
use super::required;
use crate::db::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::models::*;

/// Hiring, updating and firing cats.
#[derive(Clone)]
pub struct CatService {
    db: Database,
    breeds: Arc<BreedCatalog>,
}

impl CatService {
    pub fn new(db: Database, breeds: BreedCatalog) -> Self {
        Self {
            db,
            breeds: Arc::new(breeds),
        }
    }

    pub async fn create_cat(&self, input: CreateCatInput) -> ServiceResult<Cat> {
        let name = required("cat name", &input.name)?;
        validate_numbers(input.years_of_experience, input.salary)?;
        self.breeds.validate(&input.breed).await?;

        let cat = self.db.create_cat(CreateCatInput {
            name,
            breed: input.breed.trim().to_string(),
            ..input
        })?;

        tracing::info!("Cat {} ({}) created", cat.id, cat.name);
        Ok(cat)
    }

    pub fn get_cat(&self, id: i64) -> ServiceResult<Cat> {
        self.db
            .get_cat(id)?
            .ok_or(ServiceError::not_found("cat", id))
    }

    pub fn list_cats(&self) -> ServiceResult<Vec<Cat>> {
        Ok(self.db.get_all_cats()?)
    }

    /// Apply a partial update. The resulting record is validated as a whole;
    /// the breed is only re-checked against the catalog when it changes
    /// beyond letter case.
    pub async fn update_cat(&self, id: i64, input: UpdateCatInput) -> ServiceResult<Cat> {
        let existing = self.get_cat(id)?;

        let name = match input.name {
            Some(name) => required("cat name", &name)?,
            None => existing.name.clone(),
        };
        let years_of_experience = input
            .years_of_experience
            .unwrap_or(existing.years_of_experience);
        let salary = input.salary.unwrap_or(existing.salary);
        validate_numbers(years_of_experience, salary)?;

        let breed = match input.breed {
            Some(breed) => {
                let breed = breed.trim().to_string();
                if !breed.eq_ignore_ascii_case(&existing.breed) {
                    self.breeds.validate(&breed).await?;
                }
                breed
            }
            None => existing.breed.clone(),
        };

        self.db
            .update_cat(&Cat {
                name,
                breed,
                years_of_experience,
                salary,
                ..existing
            })?
            .ok_or(ServiceError::not_found("cat", id))
    }

    pub fn delete_cat(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_cat(id)? {
            return Err(ServiceError::not_found("cat", id));
        }
        tracing::info!("Cat {} deleted", id);
        Ok(())
    }
}

fn validate_numbers(years_of_experience: i32, salary: f64) -> ServiceResult<()> {
    if years_of_experience < 0 {
        return Err(ServiceError::validation(
            "years of experience cannot be negative",
        ));
    }
    if !salary.is_finite() || salary < 0.0 {
        return Err(ServiceError::validation("salary cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CatService {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        CatService::new(db, BreedCatalog::fixed(["Siamese", "Persian"]))
    }

    fn input(name: &str, breed: &str, years: i32, salary: f64) -> CreateCatInput {
        CreateCatInput {
            name: name.to_string(),
            breed: breed.to_string(),
            years_of_experience: years,
            salary,
        }
    }

    #[tokio::test]
    async fn create_trims_and_persists() {
        let cats = service();
        let cat = cats
            .create_cat(input("  Tom ", "siamese", 3, 1500.0))
            .await
            .unwrap();

        assert_eq!(cat.name, "Tom");
        assert_eq!(cats.get_cat(cat.id).unwrap().breed, "siamese");
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let cats = service();

        for bad in [
            input("", "Siamese", 1, 1.0),
            input("Tom", "Siamese", -1, 1.0),
            input("Tom", "Siamese", 1, -0.5),
            input("Tom", "Bulldog", 1, 1.0),
        ] {
            assert!(matches!(
                cats.create_cat(bad).await,
                Err(ServiceError::Validation(_))
            ));
        }
        assert!(cats.list_cats().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_unspecified_fields() {
        let cats = service();
        let cat = cats
            .create_cat(input("Tom", "Siamese", 3, 1500.0))
            .await
            .unwrap();

        let updated = cats
            .update_cat(
                cat.id,
                UpdateCatInput {
                    salary: Some(2000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Tom");
        assert_eq!(updated.years_of_experience, 3);
        assert_eq!(updated.salary, 2000.0);
    }

    #[tokio::test]
    async fn update_validates_new_breed() {
        let cats = service();
        let cat = cats
            .create_cat(input("Tom", "Siamese", 3, 1500.0))
            .await
            .unwrap();

        let result = cats
            .update_cat(
                cat.id,
                UpdateCatInput {
                    breed: Some("Poodle".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn update_stores_case_only_breed_change() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let cat = db
            .create_cat(input("Tom", "siamese", 3, 1500.0))
            .unwrap();
        // An empty catalog rejects every lookup, so this only passes unchecked
        let cats = CatService::new(db, BreedCatalog::fixed(Vec::<String>::new()));

        let updated = cats
            .update_cat(
                cat.id,
                UpdateCatInput {
                    breed: Some(" Siamese ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.breed, "Siamese");
        assert_eq!(cats.get_cat(cat.id).unwrap().breed, "Siamese");
    }

    #[tokio::test]
    async fn missing_cat_is_not_found() {
        let cats = service();
        assert!(matches!(
            cats.get_cat(42),
            Err(ServiceError::NotFound { entity: "cat", id: 42 })
        ));
        assert!(matches!(
            cats.delete_cat(42),
            Err(ServiceError::NotFound { .. })
        ));
    }
}
