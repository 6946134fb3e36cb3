pub mod attendance;
pub mod calendar_exception;
pub mod group;
pub mod membership;
pub mod payment;
pub mod student;

pub use attendance::AttendanceRecord;
pub use calendar_exception::{CalendarException, ExceptionKind};
pub use group::Group;
pub use membership::Membership;
pub use payment::PaymentRecord;
pub use student::Student;
