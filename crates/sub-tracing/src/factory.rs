// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{builder::TracingBuilder, subsystem::TracingSubsystem};

/// Configuration function for the tracing subsystem
pub type TracingConfigurator = Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send>;

/// Creates [`TracingSubsystem`]s for hosts that configure logging before
/// they know when it is installed.
pub struct TracingSubsystemFactory {
	configurator: Option<TracingConfigurator>,
}

impl TracingSubsystemFactory {
	pub fn new() -> Self {
		Self {
			configurator: None,
		}
	}

	pub fn with_configurator<F>(configurator: F) -> Self
	where
		F: FnOnce(TracingBuilder) -> TracingBuilder + Send + 'static,
	{
		Self {
			configurator: Some(Box::new(configurator)),
		}
	}

	pub fn create(self) -> TracingSubsystem {
		match self.configurator {
			Some(configurator) => configurator(TracingBuilder::new()).build(),
			None => TracingBuilder::default().with_env_filter().build(),
		}
	}
}

impl Default for TracingSubsystemFactory {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Format;

	#[test]
	fn test_configurator_is_applied() {
		let subsystem = TracingSubsystemFactory::with_configurator(|builder| {
			builder.with_filter("tessera_catalog=trace").with_format(Format::Pretty)
		})
		.create();
		assert_eq!(subsystem.filter(), "tessera_catalog=trace");
		assert_eq!(subsystem.format(), Format::Pretty);
	}
}
