//! Lifecycle callbacks and the registry that resolves them by name.
//!
//! Handlers are supplied under conventional names and classified once, at
//! construction, into `(target, phase)` keys:
//!
//! | Name | Runs |
//! |---|---|
//! | `before_<EVENT>` / `before_event` | before the event, named then generic |
//! | `leave_<STATE>` / `leave_state` | before leaving the state |
//! | `enter_<STATE>` / `enter_state` | after entering the state |
//! | `after_<EVENT>` / `after_event` | after the event |
//! | `<STATE>` | shorthand for `enter_<STATE>` |
//! | `<EVENT>` | shorthand for `after_<EVENT>` |

mod registry;

pub use registry::{
    classify, Classified, Handler, HandlerConflict, HandlerRegistry, RegistryReport,
};
