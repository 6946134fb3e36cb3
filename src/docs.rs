use crate::api::attendance::{CommitDayRequest, DayQuery, DeleteDayQuery};
use crate::api::calendar::{ClearDayQuery, MarkExceptionRequest};
use crate::api::dashboard::DashboardStats;
use crate::api::group::{GroupListResponse, GroupPayload};
use crate::api::report::{
    IncomeQuery, IncomeResponse, MonthlyReportResponse, PaymentToggleResponse, ReportQuery,
    TogglePaymentRequest,
};
use crate::api::student::{StudentDetail, StudentListResponse, StudentPayload, StudentQuery};
use crate::core::attendance::DaySheet;
use crate::core::report::{MonthlyIncome, StudentMonthlyReport};
use crate::model::{
    AttendanceRecord, CalendarException, ExceptionKind, Group, Membership, PaymentRecord, Student,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Club Console API",
        version = "1.0.0",
        description = r#"
## Club Management Console

Backend for a small club: students, class groups, per-session attendance,
calendar exceptions and monthly fee payments.

### Key Features
- **Students & Groups**
  - Full CRUD with soft deletes and wholesale membership replacement
- **Attendance**
  - Day sheets per group and date, full-roster batch saves
- **Calendar**
  - Holiday / cancelled-class exceptions that suppress attendance
- **Reports & Payments**
  - Monthly attendance percentages, payment toggles with fee snapshots,
    income summaries

### Consistency
A calendar exception and attendance rows never coexist for the same group
and date; conflicting states are reported, not silently repaired.
Destructive endpoints require an explicit `confirm=true`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::student::create_student,
        crate::api::student::list_students,
        crate::api::student::get_student,
        crate::api::student::update_student,
        crate::api::student::delete_student,

        crate::api::group::create_group,
        crate::api::group::list_groups,
        crate::api::group::get_group,
        crate::api::group::update_group,
        crate::api::group::delete_group,

        crate::api::attendance::get_day,
        crate::api::attendance::commit_day,
        crate::api::attendance::delete_day,

        crate::api::calendar::mark_exception,
        crate::api::calendar::clear_day,

        crate::api::report::monthly_report,
        crate::api::report::toggle_payment,
        crate::api::report::income_summary,

        crate::api::dashboard::stats
    ),
    components(
        schemas(
            Student,
            Group,
            Membership,
            AttendanceRecord,
            CalendarException,
            ExceptionKind,
            PaymentRecord,
            StudentPayload,
            StudentQuery,
            StudentListResponse,
            StudentDetail,
            GroupPayload,
            GroupListResponse,
            DayQuery,
            CommitDayRequest,
            DeleteDayQuery,
            DaySheet,
            MarkExceptionRequest,
            ClearDayQuery,
            ReportQuery,
            MonthlyReportResponse,
            StudentMonthlyReport,
            TogglePaymentRequest,
            PaymentToggleResponse,
            IncomeQuery,
            IncomeResponse,
            MonthlyIncome,
            DashboardStats
        )
    ),
    tags(
        (name = "Students", description = "Student management APIs"),
        (name = "Groups", description = "Class group management APIs"),
        (name = "Attendance", description = "Per-session attendance APIs"),
        (name = "Calendar", description = "Holiday and cancellation APIs"),
        (name = "Reports", description = "Monthly report and payment APIs"),
        (name = "Dashboard", description = "Headline statistics API"),
    )
)]
pub struct ApiDoc;
