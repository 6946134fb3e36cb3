use crate::{
    api::{attendance, calendar, dashboard, group, report, student},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let api_limiter = build_limiter(config.rate_api_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter) // rate limiting
            .service(
                web::scope("/students")
                    // /students
                    .service(
                        web::resource("")
                            .route(web::post().to(student::create_student))
                            .route(web::get().to(student::list_students)),
                    )
                    // /students/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(student::get_student))
                            .route(web::put().to(student::update_student))
                            .route(web::delete().to(student::delete_student)),
                    ),
            )
            .service(
                web::scope("/groups")
                    // /groups
                    .service(
                        web::resource("")
                            .route(web::post().to(group::create_group))
                            .route(web::get().to(group::list_groups)),
                    )
                    // /groups/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(group::get_group))
                            .route(web::put().to(group::update_group))
                            .route(web::delete().to(group::delete_group)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance?group_id&date
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::get_day))
                            .route(web::put().to(attendance::commit_day))
                            .route(web::delete().to(attendance::delete_day)),
                    ),
            )
            .service(
                web::scope("/calendar")
                    // /calendar?group_id&date
                    .service(
                        web::resource("")
                            .route(web::put().to(calendar::mark_exception))
                            .route(web::delete().to(calendar::clear_day)),
                    ),
            )
            .service(
                web::scope("/reports")
                    // /reports?group_id&month
                    .service(web::resource("").route(web::get().to(report::monthly_report)))
                    // /reports/income
                    .service(web::resource("/income").route(web::get().to(report::income_summary))),
            )
            .service(
                web::scope("/payments")
                    // /payments/toggle
                    .service(web::resource("/toggle").route(web::post().to(report::toggle_payment))),
            )
            .service(
                web::scope("/dashboard")
                    .service(web::resource("").route(web::get().to(dashboard::stats))),
            ),
    );
}
