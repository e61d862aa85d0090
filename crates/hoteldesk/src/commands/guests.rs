//! Guest command handlers.

use std::sync::Arc;

use tabled::Tabled;

use hoteldesk_core::view::{self, GuestRow};
use hoteldesk_core::{Collection, Controller, Guest, GuestForm, MutationKind};

use crate::cli::{GlobalOpts, GuestFields, GuestUpdate, GuestsArgs, GuestsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct GuestTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "ID Proof")]
    id_document: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<&Arc<Guest>> for GuestTableRow {
    fn from(guest: &Arc<Guest>) -> Self {
        let row = GuestRow::from_guest(guest);
        Self {
            id: row.id.to_string(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            id_document: row.id_document,
            address: row.address,
        }
    }
}

fn detail(guest: &Arc<Guest>) -> String {
    let row = GuestRow::from_guest(guest);
    [
        format!("ID:       {}", row.id),
        format!("Name:     {}", row.name),
        format!("Email:    {}", row.email),
        format!("Phone:    {}", row.phone),
        format!("ID Proof: {}", row.id_document),
        format!("Address:  {}", row.address),
    ]
    .join("\n")
}

// ── Form building ───────────────────────────────────────────────────

fn create_form(fields: GuestFields) -> GuestForm {
    GuestForm {
        id: None,
        name: fields.name,
        email: fields.email,
        phone: fields.phone,
        id_proof: fields.id_proof,
        id_number: fields.id_number,
        street: fields.street,
        city: fields.city,
        country: fields.country,
    }
}

fn apply_update(form: &mut GuestForm, update: GuestUpdate) {
    let GuestUpdate {
        name,
        email,
        phone,
        id_proof,
        id_number,
        street,
        city,
        country,
    } = update;
    let pairs = [
        (&mut form.name, name),
        (&mut form.email, email),
        (&mut form.phone, phone),
        (&mut form.id_proof, id_proof),
        (&mut form.id_number, id_number),
        (&mut form.street, street),
        (&mut form.city, city),
        (&mut form.country, country),
    ];
    for (slot, value) in pairs {
        if let Some(value) = value {
            *slot = value;
        }
    }
}

async fn save(
    controller: &Controller,
    form: &GuestForm,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mutation = controller
        .save_guest(form)
        .await
        .map_err(|e| CliError::from_core(e, MutationKind::UpdateGuest.failure_fallback()))?;
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
    args: GuestsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GuestsCommand::List => {
            let snap = util::load(controller, &[Collection::Guests], global).await?;
            let out = output::render_list(
                global.format(),
                snap.guests.items(),
                |g| GuestTableRow::from(g),
                |g| g.id.to_string(),
                view::NO_GUESTS,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GuestsCommand::Get { id } => {
            let snap = util::load(controller, &[Collection::Guests], global).await?;
            let guest = snap
                .guests
                .get(&id)
                .ok_or_else(|| util::not_found("guest", &id))?;
            let out =
                output::render_single(global.format(), guest, detail, |g| g.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GuestsCommand::Create(fields) => save(controller, &create_form(fields), global).await,

        GuestsCommand::Update { id, fields } => {
            let snap = util::load(controller, &[Collection::Guests], global).await?;
            if snap.guest(&id).is_none() {
                return Err(util::not_found("guest", &id));
            }
            let mut form = GuestForm::prefill(&snap, Some(&id));
            apply_update(&mut form, fields);
            save(controller, &form, global).await
        }

        GuestsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Are you sure you want to delete guest {id}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let mutation = controller
                .delete_guest(&id)
                .await
                .map_err(|e| CliError::from_core(e, MutationKind::DeleteGuest.failure_fallback()))?;
            output::notice(mutation.message(), global.quiet);
            Ok(())
        }

        GuestsCommand::Bookings { id } => {
            let snap = util::load(
                controller,
                &[Collection::Guests, Collection::Bookings],
                global,
            )
            .await?;
            let bookings =
                view::guest_bookings(&snap, &id).ok_or_else(|| util::not_found("guest", &id))?;
            let out = output::render_single(
                global.format(),
                &bookings,
                ToString::to_string,
                |b| {
                    b.entries
                        .iter()
                        .map(|e| e.booking_id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_unset_fields() {
        let mut form = GuestForm {
            id: Some("g1".into()),
            name: "Ana Cruz".into(),
            email: "ana@example.com".into(),
            phone: "0917".into(),
            id_number: "P123".into(),
            city: "Cebu".into(),
            ..GuestForm::default()
        };
        apply_update(
            &mut form,
            GuestUpdate {
                name: None,
                email: Some("ana@hotel.test".into()),
                phone: None,
                id_proof: Some("national-id".into()),
                id_number: None,
                street: None,
                city: None,
                country: Some("PH".into()),
            },
        );
        assert_eq!(form.name, "Ana Cruz");
        assert_eq!(form.email, "ana@hotel.test");
        assert_eq!(form.id_proof, "national-id");
        assert_eq!(form.city, "Cebu");
        assert_eq!(form.country, "PH");
        assert!(form.is_edit());
    }
}
