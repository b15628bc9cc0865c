#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err($crate::actor_framework::FrameworkError::into_entity_error)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list().await.map_err($crate::actor_framework::FrameworkError::into_entity_error)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err($crate::actor_framework::FrameworkError::into_entity_error)
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, $entity, $error, $entity_name_snake);
    };
}
