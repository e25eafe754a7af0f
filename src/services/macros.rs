/// Generates the constructor plus the by-id read and delete that every
/// entity service shares. `$error` must have a `NotFound` variant.
macro_rules! impl_record_service {
    ($service:ident, $entity:ty, $error:ty) => {
        impl $service {
            pub fn new(inner: $crate::services::RecordService<$entity>) -> Self {
                Self { inner }
            }

            #[tracing::instrument(skip(self))]
            pub async fn get_by_id(&self, id: $crate::record_store::RecordId) -> Result<$entity, $error> {
                tracing::debug!("Sending request");
                self.inner.get(id).await.map_err(|e| {
                    tracing::error!(error = %e, "Lookup failed");
                    <$error>::NotFound
                })
            }

            #[tracing::instrument(skip(self))]
            pub async fn try_delete(
                &self,
                id: $crate::record_store::RecordId,
            ) -> Result<bool, $crate::error::Degraded> {
                tracing::debug!("Sending request");
                self.inner.delete(vec![id]).await.map(|deleted| !deleted.is_empty())
            }

            /// Any failure reads as `false`.
            pub async fn delete(&self, id: $crate::record_store::RecordId) -> bool {
                self.try_delete(id).await.unwrap_or(false)
            }
        }
    };
}
