/// Builds a [`Listener`](crate::Listener) forwarding to methods of a shared handler.
///
/// `listener!(handler.on_sample, handler.on_failure)` clones the `Arc` held in
/// `handler` into both closures.
#[macro_export]
macro_rules! listener {
    ($handler:ident.$on_event:ident, $handler_err:ident.$on_error:ident) => {
        $crate::Listener::new(
            {
                let handler = $handler.clone();
                move |event: $crate::__private::Event| handler.$on_event(event)
            },
            {
                let handler = $handler_err.clone();
                move |error: $crate::__private::DispatchError| handler.$on_error(error)
            },
        )
    };
    ($handler:ident.$on_event:ident) => {
        $crate::Listener::events_only({
            let handler = $handler.clone();
            move |event: $crate::__private::Event| handler.$on_event(event)
        })
    };
}
