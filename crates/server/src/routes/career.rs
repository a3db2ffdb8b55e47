use crate::{
    dtos::schedule::{
        CareerResponse, GroupResponse, RoomResponse, SubjectResponse, WeeklySlotResponse,
    },
    error::AppError,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::schedule::{CareerTree, ScheduleService};

/// List careers with their groups and weekly timetables
#[utoipa::path(
    get,
    path = "/careers",
    responses(
        (status = 200, description = "Careers retrieved successfully", body = Vec<CareerResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedule"
)]
pub async fn get_careers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CareerResponse>>, AppError> {
    let careers = ScheduleService::get_careers_tree(&state.db).await?;

    Ok(Json(
        careers
            .into_iter()
            .map(convert_to_career_response)
            .collect(),
    ))
}

/// Helper function to convert the nested career rows to the API response
fn convert_to_career_response((career, groups): CareerTree) -> CareerResponse {
    let groups = groups
        .into_iter()
        .map(|(group, slots)| {
            let weekly_slots = slots
                .into_iter()
                .map(|(slot, subject, room)| WeeklySlotResponse {
                    id: slot.id,
                    weekday: slot.weekday,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    group_id: slot.group_id,
                    subject: subject.map(SubjectResponse::from),
                    room: room.map(RoomResponse::from),
                })
                .collect();

            GroupResponse {
                id: group.id,
                label: group.label,
                career_id: group.career_id,
                weekly_slots,
            }
        })
        .collect();

    CareerResponse {
        id: career.id,
        name: career.name,
        code: career.code,
        description: career.description,
        groups,
    }
}
