//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table uses a `SERIAL` key. Wrapping the raw `i32` per entity stops
//! a `GroupId` from being passed where a `StudentId` is expected.
//!
//! ```ignore
//! use cetis_models::ids::{GroupId, StudentId};
//!
//! fn sheet(student: StudentId, group: GroupId) { /* ... */ }
//!
//! sheet(StudentId::from(3), GroupId::from(11));
//! // sheet(GroupId::from(11), StudentId::from(3)); // type mismatch
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;

/// Defines a transparent `i32` newtype with sqlx, serde and OpenAPI support.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = i32)]
        pub struct $name(pub i32);

        impl $name {
            #[inline]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            #[inline]
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            #[inline]
            fn from(id: $name) -> i32 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i32 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i32 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i32 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i32 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <i32 as PgHasArrayType>::array_type_info()
            }
        }
    };
}

define_id!(
    /// ID of a `users` row.
    UserId
);

define_id!(
    /// ID of a `specialties` row.
    SpecialtyId
);

define_id!(
    /// ID of a `students` row.
    StudentId
);

define_id!(
    /// ID of a `teachers` row.
    TeacherId
);

define_id!(
    /// ID of a `subjects` row.
    SubjectId
);

define_id!(
    /// ID of a `periods` row.
    PeriodId
);

define_id!(
    /// ID of a `class_groups` row.
    GroupId
);

define_id!(
    /// ID of an `enrollments` row.
    EnrollmentId
);

define_id!(
    /// ID of an `attendances` row.
    AttendanceId
);

define_id!(
    /// ID of a `reports` row.
    ReportId
);
