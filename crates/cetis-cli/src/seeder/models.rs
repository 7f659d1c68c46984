//! Seed rows and seeding configuration.

use cetis_auth::UserType;

/// Domain of every seeded email; `clear-seed` deletes users by it.
pub const SEED_EMAIL_DOMAIN: &str = "seed.cetis.local";

/// Prefix of every seeded catalogue code (specialties, subjects, periods).
pub const SEED_CODE_PREFIX: &str = "SEED";

/// Password of every seeded account.
pub const SEED_PASSWORD: &str = "cetis1234";

pub struct UserSeed {
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
}

pub struct SpecialtySeed {
    pub name: String,
    pub code: String,
}

pub struct SubjectSeed {
    pub name: String,
    pub code: String,
    pub semester: i32,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub specialties: usize,
    pub subjects_per_specialty: usize,
    pub teachers: usize,
    pub students_per_specialty: usize,
    /// Weeks of weekday classes recorded per enrollment
    pub weeks_of_attendance: usize,
    pub reports_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            specialties: 3,
            subjects_per_specialty: 4,
            teachers: 6,
            students_per_specialty: 20,
            weeks_of_attendance: 4,
            reports_per_student: 1,
        }
    }
}

impl SeedConfig {
    pub fn total_students(&self) -> usize {
        self.specialties * self.students_per_specialty
    }

    pub fn total_groups(&self) -> usize {
        self.specialties * self.subjects_per_specialty
    }
}
