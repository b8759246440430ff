// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data version of a table; starts at 0.
pub type Version = u64;

/// Schema version of a table; starts at 0.
pub type SchemaVersion = u64;

pub const MAX_VERSION: Version = i64::MAX as u64;

macro_rules! uuid_id {
	($name:ident) => {
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub Uuid);

		impl $name {
			pub fn generate() -> Self {
				Self(Uuid::now_v7())
			}

			pub const fn min() -> Self {
				Self(Uuid::nil())
			}

			pub const fn max() -> Self {
				Self(Uuid::max())
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				Display::fmt(&self.0, f)
			}
		}

		impl From<Uuid> for $name {
			fn from(value: Uuid) -> Self {
				Self(value)
			}
		}
	};
}

uuid_id!(DirId);
uuid_id!(TableId);
uuid_id!(FunctionId);

/// Column id, unique within a table and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub u32);

impl Display for ColumnId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Row id, bound to its row for the lifetime of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl Display for RowId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
