//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block runs in the store's effect executor and evaluates to
/// `Option<Action>`; `Some` feeds the action back into the reducer.
///
/// # Example
///
/// ```rust,ignore
/// use stockroom_core::async_effect;
///
/// let api = env.api.clone();
/// async_effect! {
///     Some(match api.list_inventory().await {
///         Ok(items) => InventoryAction::InventoryFetched { items },
///         Err(error) => InventoryAction::FetchFailed {
///             message: error.to_string(),
///         },
///     })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Loaded { count: usize },
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Loaded { count: 3 })
        };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds Effect::Future");
        };
        assert_eq!(
            tokio_test::block_on(fut),
            Some(TestAction::Loaded { count: 3 })
        );
    }

    #[test]
    fn async_effect_may_settle_with_nothing() {
        let effect: Effect<TestAction> = async_effect! { None };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds Effect::Future");
        };
        assert_eq!(tokio_test::block_on(fut), None);
    }
}
