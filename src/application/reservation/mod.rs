mod errors;
mod overdue_detection;
mod reservation_service;

#[allow(unused_imports)]
pub use errors::{ReservationError, Result};
#[allow(unused_imports)]
pub use overdue_detection::{list_open, list_overdue};
#[allow(unused_imports)]
pub use reservation_service::{ServiceDependencies, close, reserve};
