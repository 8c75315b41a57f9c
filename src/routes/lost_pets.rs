use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CreateLostPetRequest, ErrorResponse, ListLostPetsQuery, LostPetStatus, Size, Species};
use crate::routes::{store_error_response, validation_error_response, AppState};
use crate::services::LostPetFilter;

/// Configure all lost-pet routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/lost-pets", web::post().to(create_lost_pet))
        .route("/lost-pets", web::get().to(list_lost_pets))
        .route("/lost-pets/{id}", web::get().to(get_lost_pet))
        .route("/lost-pets/{id}/mark-found", web::post().to(mark_found))
        .route("/lost-pets/{id}/cancel", web::post().to(cancel_lost_pet));
}

/// Register a lost pet
///
/// POST /api/v1/lost-pets
async fn create_lost_pet(
    state: web::Data<AppState>,
    req: web::Json<CreateLostPetRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_lost_pet: {}", errors);
        return validation_error_response(errors);
    }

    match state.db.create_lost_pet(&req).await {
        Ok(pet) => {
            tracing::info!("Lost pet {} registered in {}/{}", pet.id, pet.city, pet.state);
            HttpResponse::Created().json(pet)
        }
        Err(e) => store_error_response("Failed to create lost pet", e),
    }
}

/// List lost pets with optional filters
///
/// GET /api/v1/lost-pets?species=&size=&city=&state=&status=&q=
async fn list_lost_pets(
    state: web::Data<AppState>,
    query: web::Query<ListLostPetsQuery>,
) -> impl Responder {
    let filter = match build_filter(&query) {
        Ok(f) => f,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_filter".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    match state.db.list_lost_pets(&filter).await {
        Ok(pets) => HttpResponse::Ok().json(pets),
        Err(e) => store_error_response("Failed to list lost pets", e),
    }
}

/// Resolve the free-text query parameters into typed filters
fn build_filter(query: &ListLostPetsQuery) -> Result<LostPetFilter, String> {
    let species = match &query.species {
        Some(raw) => Some(Species::parse(raw).ok_or_else(|| format!("unknown species: {}", raw))?),
        None => None,
    };
    let size = match &query.size {
        Some(raw) => Some(Size::parse(raw).ok_or_else(|| format!("unknown size: {}", raw))?),
        None => None,
    };
    let status = match &query.status {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "perdido" => Some(LostPetStatus::Lost),
            "encontrado" => Some(LostPetStatus::Found),
            "cancelado" => Some(LostPetStatus::Canceled),
            _ => return Err(format!("unknown status: {}", raw)),
        },
        None => None,
    };

    Ok(LostPetFilter {
        species,
        size,
        city: query.city.clone(),
        state: query.state.clone(),
        status,
        name: query.q.clone(),
    })
}

/// Fetch one lost pet and bump its view counter
///
/// GET /api/v1/lost-pets/{id}
async fn get_lost_pet(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.db.view_lost_pet(path.into_inner()).await {
        Ok(pet) => HttpResponse::Ok().json(pet),
        Err(e) => store_error_response("Failed to fetch lost pet", e),
    }
}

/// Owner self-resolution: the pet came home
///
/// POST /api/v1/lost-pets/{id}/mark-found
async fn mark_found(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.db.mark_lost_pet_found(path.into_inner()).await {
        Ok(pet) => HttpResponse::Ok().json(pet),
        Err(e) => store_error_response("Failed to mark lost pet found", e),
    }
}

/// Take a record off the map without a resolution
///
/// POST /api/v1/lost-pets/{id}/cancel
async fn cancel_lost_pet(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.db.cancel_lost_pet(path.into_inner()).await {
        Ok(pet) => HttpResponse::Ok().json(pet),
        Err(e) => store_error_response("Failed to cancel lost pet", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(species: Option<&str>, status: Option<&str>) -> ListLostPetsQuery {
        ListLostPetsQuery {
            species: species.map(String::from),
            size: None,
            city: None,
            state: None,
            status: status.map(String::from),
            q: None,
        }
    }

    #[test]
    fn test_build_filter_parses_enums_case_insensitively() {
        let filter = build_filter(&query(Some("Cachorro"), Some("PERDIDO"))).unwrap();
        assert_eq!(filter.species, Some(Species::Dog));
        assert_eq!(filter.status, Some(LostPetStatus::Lost));
    }

    #[test]
    fn test_build_filter_rejects_unknown_values() {
        assert!(build_filter(&query(Some("papagaio"), None)).is_err());
        assert!(build_filter(&query(None, Some("sumiu"))).is_err());
    }
}
