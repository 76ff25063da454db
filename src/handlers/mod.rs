pub mod auth;
pub mod companies;
pub mod contracts;
pub mod creators;
pub mod deals;
pub mod media;
pub mod notifications;
pub mod rooms;
pub mod signatures;
pub mod terms;
pub mod users;

use actix_web::web;

use crate::chat::session;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login/refresh/logout are public) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/refresh", web::post().to(auth::refresh))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes (all protected — require valid JWT) ──
    cfg.service(
        web::resource("/users")
            .route(web::get().to(users::get_users)),
    );
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Profile routes ──
    cfg.service(
        web::scope("/companies")
            .route("/me", web::get().to(companies::get_own_company))
            .route("/me", web::put().to(companies::update_own_company))
            .route("/{id}", web::get().to(companies::get_company)),
    );
    cfg.service(
        web::scope("/creators")
            .route("", web::get().to(creators::get_creators))
            .route("/me", web::get().to(creators::get_own_creator))
            .route("/me", web::put().to(creators::update_own_creator))
            .route("/{id}", web::get().to(creators::get_creator)),
    );

    // ── Contract routes (verify is public — QR scans carry no JWT) ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route("/verify/{serial}", web::get().to(contracts::verify_contract))
            .route("/company/{company_id}", web::get().to(contracts::get_contracts_by_company))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}", web::put().to(contracts::update_contract))
            .route("/{id}", web::delete().to(contracts::delete_contract))
            .route("/{id}/status", web::put().to(contracts::update_status)),
    );

    // ── Deal routes ──
    cfg.service(
        web::scope("/deals")
            .route("/request", web::post().to(deals::create_deal_request))
            .route("/mine", web::get().to(deals::get_my_deals))
            .route("/contract/{contract_id}", web::get().to(deals::get_deals_by_contract))
            .route("/{id}/accept", web::put().to(deals::accept_deal))
            .route("/{id}/reject", web::put().to(deals::reject_deal))
            .route("/{id}/complete", web::put().to(deals::complete_deal)),
    );

    // ── Term routes ──
    cfg.service(
        web::scope("/terms")
            .route("", web::post().to(terms::create_term))
            .route("/deal/{deal_id}", web::get().to(terms::get_terms_by_deal))
            .route("/{id}", web::put().to(terms::update_term))
            .route("/{id}/confirm", web::post().to(terms::confirm_term)),
    );

    // ── Media routes ──
    cfg.service(
        web::scope("/media")
            .route("", web::post().to(media::upload_media))
            .route("/owner/{owner_type}/{owner_id}", web::get().to(media::get_media_by_owner))
            .route("/{id}", web::get().to(media::get_media))
            .route("/{id}", web::delete().to(media::delete_media)),
    );

    // ── Signature routes ──
    cfg.service(
        web::scope("/signatures")
            .route("", web::post().to(signatures::create_signature))
            .route("/contract/{contract_id}", web::get().to(signatures::get_signatures_by_contract)),
    );

    // ── Room + message routes ──
    cfg.service(
        web::scope("/rooms")
            .route("", web::get().to(rooms::get_conversations))
            .route("", web::post().to(rooms::create_room))
            .route("/{room_id}/messages", web::get().to(rooms::get_messages))
            .route("/{room_id}/read", web::put().to(rooms::mark_room_read)),
    );

    // ── Notification routes ──
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::get_notifications))
            .route("/unread-count", web::get().to(notifications::get_unread_count))
            .route("/read-all", web::put().to(notifications::mark_all_read))
            .route("/{id}/read", web::put().to(notifications::mark_read)),
    );

    // ── WebSocket chat ──
    cfg.service(
        web::resource("/chat/ws/{room_id}")
            .route(web::get().to(session::ws_connect)),
    );
}
