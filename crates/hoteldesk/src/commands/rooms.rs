//! Room command handlers.

use std::sync::Arc;

use tabled::Tabled;

use hoteldesk_core::view::{self, RoomRow};
use hoteldesk_core::{Collection, Controller, MutationKind, Room, RoomFilter, RoomForm};

use crate::cli::{GlobalOpts, RoomFields, RoomUpdate, RoomsArgs, RoomsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Room")]
    number: String,
    #[tabled(rename = "Type")]
    room_type: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Amenities")]
    amenities: String,
}

impl From<&Arc<Room>> for RoomTableRow {
    fn from(room: &Arc<Room>) -> Self {
        let row = RoomRow::from_room(room);
        Self {
            id: row.id.to_string(),
            number: row.number,
            room_type: row.room_type,
            price: row.price,
            status: row.status.label().into_owned(),
            capacity: row.capacity,
            amenities: row.amenities,
        }
    }
}

fn detail(room: &Arc<Room>) -> String {
    let row = RoomRow::from_room(room);
    [
        format!("ID:        {}", row.id),
        format!("Room:      {}", row.number),
        format!("Type:      {}", row.room_type),
        format!("Price:     {}", row.price),
        format!("Status:    {}", row.status.label()),
        format!("Capacity:  {}", row.capacity),
        format!(
            "Amenities: {}",
            if row.amenities.is_empty() {
                "-"
            } else {
                row.amenities.as_str()
            }
        ),
    ]
    .join("\n")
}

// ── Form building ───────────────────────────────────────────────────

fn create_form(fields: RoomFields) -> RoomForm {
    RoomForm {
        id: None,
        number: fields.number,
        room_type: fields.room_type.into(),
        price: fields.price,
        capacity: fields.capacity,
        status: fields.status.into(),
        amenities: fields.amenities,
    }
}

fn apply_update(form: &mut RoomForm, update: RoomUpdate) {
    if let Some(number) = update.number {
        form.number = number;
    }
    if let Some(room_type) = update.room_type {
        form.room_type = room_type.into();
    }
    if let Some(price) = update.price {
        form.price = price;
    }
    if let Some(capacity) = update.capacity {
        form.capacity = capacity;
    }
    if let Some(status) = update.status {
        form.status = status.into();
    }
    if let Some(amenities) = update.amenities {
        form.amenities = amenities;
    }
}

async fn save(
    controller: &Controller,
    form: &RoomForm,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mutation = controller
        .save_room(form)
        .await
        .map_err(|e| CliError::from_core(e, MutationKind::UpdateRoom.failure_fallback()))?;
    output::notice(mutation.message(), global.quiet);
    for notice in mutation.reload.notices() {
        output::notice(&notice, global.quiet);
    }
    if let Some(id) = mutation.id {
        output::print_output(id.as_str(), global.quiet);
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: RoomsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RoomsCommand::List { status, room_type } => {
            let snap = util::load(controller, &[Collection::Rooms], global).await?;
            let filter = RoomFilter::new(status.map(Into::into), room_type.map(Into::into));
            let rooms = filter.apply(snap.rooms.items());
            let out = output::render_list(
                global.format(),
                &rooms,
                |r| RoomTableRow::from(r),
                |r| r.id.to_string(),
                view::NO_ROOMS,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoomsCommand::Get { id } => {
            let snap = util::load(controller, &[Collection::Rooms], global).await?;
            let room = snap
                .rooms
                .get(&id)
                .ok_or_else(|| util::not_found("room", &id))?;
            let out = output::render_single(global.format(), room, detail, |r| r.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoomsCommand::Create(fields) => save(controller, &create_form(fields), global).await,

        RoomsCommand::Update { id, fields } => {
            let snap = util::load(controller, &[Collection::Rooms], global).await?;
            if snap.room(&id).is_none() {
                return Err(util::not_found("room", &id));
            }
            let mut form = RoomForm::prefill(&snap, Some(&id));
            apply_update(&mut form, fields);
            save(controller, &form, global).await
        }

        RoomsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Are you sure you want to delete room {id}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let mutation = controller
                .delete_room(&id)
                .await
                .map_err(|e| CliError::from_core(e, MutationKind::DeleteRoom.failure_fallback()))?;
            output::notice(mutation.message(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{RoomStatusArg, RoomTypeArg};
    use hoteldesk_core::{RoomStatus, RoomType};

    fn fields() -> RoomFields {
        RoomFields {
            number: "101".into(),
            room_type: RoomTypeArg::Suite,
            price: "3500".into(),
            capacity: "2".into(),
            status: RoomStatusArg::Available,
            amenities: vec!["wifi".into(), "tv".into()],
        }
    }

    #[test]
    fn create_form_maps_args() {
        let form = create_form(fields());
        assert!(!form.is_edit());
        assert_eq!(form.room_type, RoomType::Suite);
        assert_eq!(form.status, RoomStatus::Available);
        assert_eq!(form.amenities, ["wifi", "tv"]);
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut form = create_form(fields());
        apply_update(
            &mut form,
            RoomUpdate {
                number: None,
                room_type: None,
                price: Some("4000".into()),
                capacity: None,
                status: Some(RoomStatusArg::Maintenance),
                amenities: None,
            },
        );
        assert_eq!(form.number, "101");
        assert_eq!(form.price, "4000");
        assert_eq!(form.status, RoomStatus::Maintenance);
        assert_eq!(form.amenities, ["wifi", "tv"]);
    }
}
