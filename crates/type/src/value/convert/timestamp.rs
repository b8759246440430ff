// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Parses an ISO-8601 date or date-time. Offsets are normalised to UTC.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
		return Some(dt.naive_utc());
	}

	for format in OFFSET_FORMATS {
		if let Ok(dt) = DateTime::parse_from_str(input, format) {
			return Some(dt.naive_utc());
		}
	}

	for format in NAIVE_FORMATS {
		if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
			return Some(dt);
		}
	}

	NaiveDate::parse_from_str(input, "%Y-%m-%d").ok().and_then(|date| date.and_hms_opt(0, 0, 0))
}
