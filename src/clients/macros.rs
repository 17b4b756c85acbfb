/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

/// Generate one cart client method per [`CartCommand`](crate::cart_actor::CartCommand).
///
/// The variant is derived from the method name, so `add_to_cart` dispatches
/// `CartCommand::AddToCart`.
macro_rules! cart_command {
    ($client:ty => fn $method:ident()) => {
        paste::paste! {
            impl $client {
                #[tracing::instrument(skip(self))]
                pub async fn $method(&self) -> Result<crate::domain::CartState, crate::error::CartError> {
                    self.dispatch(crate::cart_actor::CartCommand::[<$method:camel>]).await
                }
            }
        }
    };
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),+)) => {
        paste::paste! {
            impl $client {
                #[tracing::instrument(skip(self))]
                pub async fn $method(&self, $($param: $param_type),+) -> Result<crate::domain::CartState, crate::error::CartError> {
                    self.dispatch(crate::cart_actor::CartCommand::[<$method:camel>]($($param),+)).await
                }
            }
        }
    };
}
