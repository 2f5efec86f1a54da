//! Macros for declaring transitions and arguments with little boilerplate.

/// Declare a list of transition descriptors.
///
/// Each line reads `event: [sources...] => destination`; names are taken
/// verbatim from the identifiers.
///
/// # Example
///
/// ```
/// use hookfsm::transitions;
///
/// let descriptors = transitions! {
///     warn: [green] => yellow,
///     panic: [yellow, green] => red,
///     calm: [red] => yellow,
///     clear: [yellow] => green,
/// };
///
/// assert_eq!(descriptors.len(), 4);
/// assert_eq!(descriptors[1].sources, vec!["yellow", "green"]);
/// ```
#[macro_export]
macro_rules! transitions {
    (
        $(
            $event:ident : [ $( $source:ident ),* $(,)? ] => $destination:ident
        ),* $(,)?
    ) => {
        ::std::vec![
            $(
                $crate::core::TransitionDescriptor::new(
                    ::std::stringify!($event),
                    {
                        let sources: ::std::vec::Vec<&str> =
                            ::std::vec![$( ::std::stringify!($source) ),*];
                        sources
                    },
                    ::std::stringify!($destination),
                )
            ),*
        ]
    };
}

/// Build an argument list for [`Machine::fire_with`].
///
/// [`Machine::fire_with`]: crate::machine::Machine::fire_with
///
/// # Example
///
/// ```
/// use hookfsm::args;
///
/// let args = args!["test", 42u32];
/// assert_eq!(args.len(), 2);
/// assert_eq!(args[1].downcast_ref::<u32>(), Some(&42));
/// ```
#[macro_export]
macro_rules! args {
    ( $( $arg:expr ),* $(,)? ) => {
        {
            let args: ::std::vec::Vec<$crate::machine::Arg> =
                ::std::vec![$( ::std::boxed::Box::new($arg) as $crate::machine::Arg ),*];
            args
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::TransitionDescriptor;

    #[test]
    fn transitions_macro_builds_descriptors() {
        let descriptors = transitions! {
            first: [one] => two,
            reset: [one, two, three] => one,
        };

        assert_eq!(
            descriptors,
            vec![
                TransitionDescriptor::new("first", ["one"], "two"),
                TransitionDescriptor::new("reset", ["one", "two", "three"], "one"),
            ]
        );
    }

    #[test]
    fn transitions_macro_accepts_empty_sources() {
        let descriptors = transitions! { never: [] => nowhere };

        assert!(descriptors[0].sources.is_empty());
    }

    #[test]
    fn args_macro_boxes_values() {
        let args = args!["test", String::from("owned"), 7i64];

        assert_eq!(args[0].downcast_ref::<&str>(), Some(&"test"));
        assert_eq!(args[1].downcast_ref::<String>().map(String::as_str), Some("owned"));
        assert_eq!(args[2].downcast_ref::<i64>(), Some(&7));
    }

    #[test]
    fn args_macro_allows_empty_list() {
        let args = args![];

        assert!(args.is_empty());
    }
}
