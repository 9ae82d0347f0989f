//! A composite probe that delegates to multiple [`StreamProbe`] implementations.

use std::path::Path;

use async_trait::async_trait;
use multiremux_common::StreamDescriptor;

use crate::prober::StreamProbe;
use crate::{Error, Result};

/// Tries each registered [`StreamProbe`] in order and returns the first
/// successful result.
pub struct CompositeProbe {
    probes: Vec<Box<dyn StreamProbe>>,
}

impl CompositeProbe {
    /// Create a new `CompositeProbe` from an ordered list of probes.
    pub fn new(probes: Vec<Box<dyn StreamProbe>>) -> Self {
        Self { probes }
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

#[async_trait]
impl StreamProbe for CompositeProbe {
    fn name(&self) -> &'static str {
        "composite"
    }

    async fn probe(&self, path: &Path) -> Result<Vec<StreamDescriptor>> {
        let mut last_err = None;

        for probe in &self.probes {
            match probe.probe(path).await {
                Ok(streams) => return Ok(streams),
                Err(e) => {
                    tracing::debug!(
                        probe = probe.name(),
                        error = %e,
                        "probe failed, trying next"
                    );
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| Error::NoProbe {
            path: path.to_path_buf(),
        }))
    }
}
