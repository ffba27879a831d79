/// Generates the constructor plus the create / get-by-id / delete methods every
/// resource client shares, named after the resource (`create_customer`,
/// `get_customer_by_id`, `delete_customer`).
macro_rules! impl_resource_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(api: $crate::request_framework::ApiClient) -> Self {
                    Self { inner: $crate::request_framework::ResourceClient::new(api) }
                }

                #[tracing::instrument(skip(self, payload))]
                pub async fn [<create_ $entity_name_snake>](
                    &self,
                    payload: &<$entity as $crate::request_framework::Resource>::Create,
                ) -> Result<$entity, $crate::error::ActionError> {
                    self.inner.create(payload).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake _by_id>](
                    &self,
                    id: <$entity as $crate::request_framework::Resource>::Id,
                ) -> Result<$entity, $crate::error::ActionError> {
                    self.inner.get(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::request_framework::Resource>::Id,
                ) -> Result<<$entity as $crate::request_framework::Resource>::Id, $crate::error::ActionError> {
                    self.inner.delete(id).await
                }
            }
        }
    };
}
