// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{
	ColumnType,
	error::{Diagnostic, IntoDiagnostic},
};

use crate::{
	id::{ColumnId, DirId, FunctionId, RowId, SchemaVersion, TableId, Version},
	key::Key,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
	#[error("directory {dir} does not exist")]
	DirNotFound {
		dir: DirId,
	},

	#[error("table {table} does not exist")]
	TableNotFound {
		table: TableId,
	},

	#[error("table {table} has no column `{column}`")]
	ColumnNotFound {
		table: TableId,
		column: String,
	},

	#[error("table {table} already has a column `{column}`")]
	ColumnAlreadyExists {
		table: TableId,
		column: String,
	},

	#[error("table {table} has no version {version}")]
	VersionNotFound {
		table: TableId,
		version: Version,
	},

	#[error("table {table} is a snapshot and cannot be modified")]
	ImmutableSnapshot {
		table: TableId,
	},

	#[error("rows of view {table} are derived from its base and cannot be inserted or deleted")]
	ViewRowMutation {
		table: TableId,
	},

	#[error("column `{column}` of table {table} is referenced by computed column `{dependent}`")]
	ColumnInUse {
		table: TableId,
		column: String,
		dependent: String,
	},

	#[error("column `{column}` of table {table} is part of the primary key")]
	PrimaryKeyColumn {
		table: TableId,
		column: String,
	},

	#[error("invalid {kind} name `{name}`")]
	InvalidName {
		kind: &'static str,
		name: String,
	},

	#[error("column `{column}` of type {col_type} cannot be indexed")]
	NotIndexable {
		column: String,
		col_type: ColumnType,
	},

	#[error("column `{column}` is not computed; only computed columns can be virtual")]
	InvalidStoragePolicy {
		column: String,
	},

	#[error("table {table}: the number of retained versions must be positive")]
	InvalidRetention {
		table: TableId,
	},

	#[error("function {function} does not exist")]
	FunctionNotFound {
		function: FunctionId,
	},

	#[error("cannot create a live view over snapshot {base}")]
	LiveViewOverSnapshot {
		base: TableId,
	},

	#[error("table {table} never allocated row {row}")]
	RowNotAllocated {
		table: TableId,
		row: RowId,
	},

	#[error("computed column `{column}` cannot be part of the primary key")]
	ComputedPrimaryKey {
		column: String,
	},

	#[error("computed column `{column}` references unknown column `{reference}`")]
	UnknownColumnReference {
		column: String,
		reference: String,
	},

	#[error("live view over {base} tracks its head and cannot be pinned to version {version}")]
	LiveViewAtVersion {
		base: TableId,
		version: Version,
	},

	#[error("table {table}: cannot allocate {count} more row ids")]
	RowIdsExhausted {
		table: TableId,
		count: u64,
	},

	#[error("table {table}: expected version {expected}, but the table is at version {actual}")]
	VersionConflict {
		table: TableId,
		expected: Version,
		actual: Version,
	},

	#[error("cannot decode metadata record {key}: {reason}")]
	Undecodable {
		key: Key,
		reason: String,
	},

	#[error("metadata record {key} is invalid: {reason}")]
	InvalidRecord {
		key: Key,
		reason: String,
	},

	#[error("stored metadata schema version {stored} is newer than the supported version {supported}")]
	UnsupportedSchemaVersion {
		stored: u32,
		supported: u32,
	},

	#[error("metadata record {key} is missing")]
	MissingRecord {
		key: Key,
	},

	#[error("column {column} of table {table} has no history entry at schema version {schema_version}")]
	MissingHistory {
		table: TableId,
		column: ColumnId,
		schema_version: SchemaVersion,
	},
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			CatalogError::DirNotFound {
				..
			} => Diagnostic::new("CATALOG_001", message),
			CatalogError::TableNotFound {
				..
			} => Diagnostic::new("CATALOG_002", message),
			CatalogError::ColumnNotFound {
				..
			} => Diagnostic::new("CATALOG_003", message),
			CatalogError::ColumnAlreadyExists {
				..
			} => Diagnostic::new("CATALOG_004", message).with_help("choose a different column name"),
			CatalogError::VersionNotFound {
				..
			} => Diagnostic::new("CATALOG_005", message)
				.with_note("versions outside the retention window may have been collected"),
			CatalogError::ImmutableSnapshot {
				..
			} => Diagnostic::new("CATALOG_006", message),
			CatalogError::ViewRowMutation {
				..
			} => Diagnostic::new("CATALOG_007", message).with_help("modify the base table instead"),
			CatalogError::ColumnInUse {
				..
			} => Diagnostic::new("CATALOG_008", message).with_help("drop the computed column first"),
			CatalogError::PrimaryKeyColumn {
				..
			} => Diagnostic::new("CATALOG_009", message),
			CatalogError::InvalidName {
				..
			} => Diagnostic::new("CATALOG_010", message)
				.with_help("names must be identifiers: a letter or `_` followed by letters, digits or `_`"),
			CatalogError::NotIndexable {
				..
			} => Diagnostic::new("CATALOG_011", message).with_note("only image and string columns can be indexed"),
			CatalogError::InvalidStoragePolicy {
				..
			} => Diagnostic::new("CATALOG_012", message),
			CatalogError::InvalidRetention {
				..
			} => Diagnostic::new("CATALOG_013", message),
			CatalogError::FunctionNotFound {
				..
			} => Diagnostic::new("CATALOG_014", message),
			CatalogError::LiveViewOverSnapshot {
				..
			} => Diagnostic::new("CATALOG_015", message).with_help("create a snapshot view instead"),
			CatalogError::RowNotAllocated {
				..
			} => Diagnostic::new("CATALOG_016", message),
			CatalogError::ComputedPrimaryKey {
				..
			} => Diagnostic::new("CATALOG_017", message),
			CatalogError::UnknownColumnReference {
				..
			} => Diagnostic::new("CATALOG_018", message),
			CatalogError::LiveViewAtVersion {
				..
			} => Diagnostic::new("CATALOG_019", message).with_help("create a snapshot view to pin a base version"),
			CatalogError::RowIdsExhausted {
				..
			} => Diagnostic::new("CATALOG_020", message),
			CatalogError::VersionConflict {
				..
			} => Diagnostic::new("VERSION_001", message)
				.with_label("concurrent modification")
				.with_help("reload the table and retry with its current version"),
			CatalogError::Undecodable {
				..
			} => Diagnostic::new("METADATA_001", message),
			CatalogError::InvalidRecord {
				..
			} => Diagnostic::new("METADATA_002", message),
			CatalogError::UnsupportedSchemaVersion {
				..
			} => Diagnostic::new("METADATA_003", message).with_help("upgrade to a newer release"),
			CatalogError::MissingRecord {
				..
			} => Diagnostic::new("METADATA_004", message),
			CatalogError::MissingHistory {
				..
			} => Diagnostic::new("METADATA_005", message),
		}
	}
}
