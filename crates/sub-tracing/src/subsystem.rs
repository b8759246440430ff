// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, error};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::{builder::Format, error::TracingError};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// A configured subscriber, installed globally with [`TracingSubsystem::init`]
/// or for a scope with [`TracingSubsystem::with_default`].
#[derive(Debug, Clone)]
pub struct TracingSubsystem {
	filter: String,
	format: Format,
	with_target: bool,
	with_thread_names: bool,
}

impl TracingSubsystem {
	pub(crate) fn new(filter: String, format: Format, with_target: bool, with_thread_names: bool) -> Self {
		Self {
			filter,
			format,
			with_target,
			with_thread_names,
		}
	}

	pub fn filter(&self) -> &str {
		&self.filter
	}

	pub fn format(&self) -> Format {
		self.format
	}

	/// Installs the subscriber for the whole process.
	pub fn init(&self) -> Result<()> {
		let subscriber = self.subscriber()?;
		tracing::subscriber::set_global_default(subscriber).map_err(|_| error!(TracingError::AlreadyInstalled))
	}

	/// Runs `f` with the subscriber as the thread's default.
	pub fn with_default<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
		let subscriber = self.subscriber()?;
		Ok(tracing::subscriber::with_default(subscriber, f))
	}

	fn subscriber(&self) -> Result<BoxedSubscriber> {
		let filter = EnvFilter::try_new(&self.filter).map_err(|err| {
			error!(TracingError::InvalidFilter {
				directive: self.filter.clone(),
				reason: err.to_string(),
			})
		})?;
		let layer = fmt::layer().with_target(self.with_target).with_thread_names(self.with_thread_names);
		let registry = tracing_subscriber::registry().with(filter);

		let result: BoxedSubscriber = match self.format {
			Format::Pretty => Box::new(registry.with(layer.pretty())),
			Format::Compact => Box::new(registry.with(layer.compact())),
			Format::Json => Box::new(registry.with(layer.json())),
		};
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use tracing::info;

	use crate::{Format, TracingBuilder};

	#[test]
	fn test_with_default() {
		let subsystem = TracingBuilder::new().with_filter("debug").with_format(Format::Json).build();
		let result = subsystem
			.with_default(|| {
				info!("inside");
				42
			})
			.unwrap();
		assert_eq!(result, 42);
	}

	#[test]
	fn test_invalid_filter() {
		let subsystem = TracingBuilder::new().with_filter("tessera=loud").build();
		let err = subsystem.with_default(|| ()).unwrap_err();
		assert_eq!(err.code, "TRACING_001");
	}
}
