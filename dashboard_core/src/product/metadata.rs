//! Metadata update helper
//!
//! Wraps an inner submit and afterwards writes public and private metadata,
//! each only when its key/value set actually changed.

use super::api::{MetadataMutations, MetadataUpdateVariables};
use super::errors::SubmitOutcome;
use super::status::{MutationStep, StatusBoard, SubmitPhase};
use super::types::MetadataItem;
use crate::Result;
use log::debug;
use std::collections::BTreeSet;
use std::future::Future;

/// Metadata as fetched and as submitted
#[derive(Debug, Clone, Copy)]
pub struct MetadataChange<'a> {
    pub initial: &'a [MetadataItem],
    pub submitted: &'a [MetadataItem],
}

impl<'a> MetadataChange<'a> {
    pub fn new(initial: &'a [MetadataItem], submitted: &'a [MetadataItem]) -> Self {
        Self { initial, submitted }
    }

    pub fn has_changed(&self) -> bool {
        has_metadata_changed(self.initial, self.submitted)
    }
}

/// Order-insensitive comparison of two metadata lists
pub fn has_metadata_changed(initial: &[MetadataItem], submitted: &[MetadataItem]) -> bool {
    let initial: BTreeSet<&MetadataItem> = initial.iter().collect();
    let submitted: BTreeSet<&MetadataItem> = submitted.iter().collect();
    initial != submitted
}

pub fn metadata_variables(object_id: &str, change: MetadataChange<'_>) -> MetadataUpdateVariables {
    let kept: BTreeSet<&str> = change
        .submitted
        .iter()
        .map(|item| item.key.as_str())
        .collect();

    MetadataUpdateVariables {
        id: object_id.to_string(),
        input: change.submitted.to_vec(),
        keys_to_delete: change
            .initial
            .iter()
            .filter(|item| !kept.contains(item.key.as_str()))
            .map(|item| item.key.clone())
            .collect(),
    }
}

pub struct MetadataUpdateHandler<'a, M: ?Sized> {
    api: &'a M,
    status: &'a StatusBoard,
}

impl<'a, M> MetadataUpdateHandler<'a, M>
where
    M: MetadataMutations + ?Sized,
{
    pub fn new(api: &'a M, status: &'a StatusBoard) -> Self {
        Self { api, status }
    }

    /// Run `inner`, then the metadata writes, returning inner errors followed
    /// by public and private metadata errors
    pub async fn run<F>(
        &self,
        object_id: &str,
        metadata: MetadataChange<'_>,
        private_metadata: MetadataChange<'_>,
        inner: F,
    ) -> Result<SubmitOutcome>
    where
        F: Future<Output = Result<SubmitOutcome>>,
    {
        let mut errors = inner.await?;

        self.status.set_phase(SubmitPhase::UpdatingMetadata);

        let public = async {
            if !metadata.has_changed() {
                debug!("Metadata unchanged, skipping update");
                return Ok(Vec::new());
            }
            let variables = metadata_variables(object_id, metadata);
            self.status
                .tracked(MutationStep::UpdateMetadata, self.api.update_metadata(variables))
                .await
                .map(|payload| payload.errors)
        };
        let private = async {
            if !private_metadata.has_changed() {
                debug!("Private metadata unchanged, skipping update");
                return Ok(Vec::new());
            }
            let variables = metadata_variables(object_id, private_metadata);
            self.status
                .tracked(
                    MutationStep::UpdatePrivateMetadata,
                    self.api.update_private_metadata(variables),
                )
                .await
                .map(|payload| payload.errors)
        };

        let (public, private) = futures::join!(public, private);
        errors.extend(public?);
        errors.extend(private?);
        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reordered_metadata_is_unchanged() {
        let initial = vec![MetadataItem::new("a", "1"), MetadataItem::new("b", "2")];
        let submitted = vec![MetadataItem::new("b", "2"), MetadataItem::new("a", "1")];

        assert!(!has_metadata_changed(&initial, &submitted));
    }

    #[test]
    fn test_changed_value_is_detected() {
        let initial = vec![MetadataItem::new("a", "1")];
        let submitted = vec![MetadataItem::new("a", "2")];

        assert!(has_metadata_changed(&initial, &submitted));
        assert!(has_metadata_changed(&initial, &[]));
    }

    #[test]
    fn test_variables_delete_dropped_keys() {
        let initial = vec![MetadataItem::new("a", "1"), MetadataItem::new("b", "2")];
        let submitted = vec![MetadataItem::new("a", "3")];

        let variables = metadata_variables("p1", MetadataChange::new(&initial, &submitted));
        assert_eq!(variables.id, "p1");
        assert_eq!(variables.input, submitted);
        assert_eq!(variables.keys_to_delete, vec!["b"]);
    }
}
