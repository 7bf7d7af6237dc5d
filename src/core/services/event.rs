use chrono::{NaiveDate, Utc};

use crate::core::models::common::eq_ci;
use crate::core::models::event::{Event, EventFilter, EventForm, EventInsert, EventWindow};
use crate::core::ports::repository::EventCommon;
use crate::core::validation::Checker;
use crate::error::Error;

fn validate_event(form: EventForm) -> Result<(EventForm, NaiveDate), Error> {
    let mut checker = Checker::default();
    checker.required("eventName", "Event name", &form.event_name).required("venue", "Venue", &form.venue);
    if form.event_date.is_none() {
        checker.fail("eventDate", "Event date is required");
    }
    if let (Some(deadline), Some(date)) = (form.registration_deadline, form.event_date) {
        if deadline > date {
            checker.fail("registrationDeadline", "Registration deadline must not be after the event date");
        }
    }
    if let Some(max) = form.max_participants {
        if max <= 0 {
            checker.fail("maxParticipants", "Max participants must be positive");
        }
    }
    checker.finish()?;
    match form.event_date {
        Some(date) => Ok((form, date)),
        None => Err(Error::Validation(Error::field("eventDate", "Event date is required"))),
    }
}

pub async fn create_event<S: EventCommon>(store: &S, form: EventForm) -> Result<Event, Error> {
    let (form, event_date) = validate_event(form)?;
    let event = EventCommon::insert(
        store,
        EventInsert {
            event_name: form.event_name.trim().to_owned(),
            event_type: form.event_type.trim().to_owned(),
            organized_by: form.organized_by.trim().to_owned(),
            event_date,
            start_time: form.start_time.trim().to_owned(),
            end_time: form.end_time.trim().to_owned(),
            venue: form.venue.trim().to_owned(),
            description: form.description,
            image_url: form.image_url,
            registration_required: form.registration_required,
            registration_deadline: form.registration_deadline,
            max_participants: form.max_participants,
            contact_person: form.contact_person.trim().to_owned(),
            status: form.status.trim().to_owned(),
            is_active: form.is_active,
            created_at: Utc::now(),
        },
    )
    .await?;
    Ok(event)
}

pub async fn overwrite_event<S: EventCommon>(store: &S, id: &str, form: EventForm) -> Result<Event, Error> {
    let (form, event_date) = validate_event(form)?;
    let current = EventCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("event {}", id)))?;
    let event = Event {
        event_id: current.event_id,
        event_name: form.event_name.trim().to_owned(),
        event_type: form.event_type.trim().to_owned(),
        organized_by: form.organized_by.trim().to_owned(),
        event_date,
        start_time: form.start_time.trim().to_owned(),
        end_time: form.end_time.trim().to_owned(),
        venue: form.venue.trim().to_owned(),
        description: form.description,
        image_url: form.image_url,
        registration_required: form.registration_required,
        registration_deadline: form.registration_deadline,
        max_participants: form.max_participants,
        contact_person: form.contact_person.trim().to_owned(),
        status: form.status.trim().to_owned(),
        is_active: form.is_active,
        created_at: current.created_at,
    };
    if !EventCommon::replace(store, &event).await? {
        return Err(Error::NotFound(format!("event {}", id)));
    }
    Ok(event)
}

pub async fn set_event_active<S: EventCommon>(store: &S, id: &str, is_active: bool) -> Result<Event, Error> {
    if !EventCommon::set_active(store, id, is_active).await? {
        return Err(Error::NotFound(format!("event {}", id)));
    }
    EventCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("event {}", id)))
}

pub async fn delete_event<S: EventCommon>(store: &S, id: &str) -> Result<(), Error> {
    if !EventCommon::delete(store, id).await? {
        return Err(Error::NotFound(format!("event {}", id)));
    }
    Ok(())
}

/// Upcoming events run soonest first, past events most recent first.
pub fn filter_events(events: Vec<Event>, filter: &EventFilter, today: NaiveDate) -> Vec<Event> {
    let mut list: Vec<Event> = events
        .into_iter()
        .filter(|e| filter.include_inactive || e.is_active)
        .filter(|e| match filter.window {
            EventWindow::Upcoming => e.event_date >= today,
            EventWindow::Past => e.event_date < today,
            EventWindow::All => true,
        })
        .filter(|e| filter.event_type.as_ref().map_or(true, |t| eq_ci(&e.event_type, t)))
        .collect();
    match filter.window {
        EventWindow::Past => list.sort_by(|a, b| b.event_date.cmp(&a.event_date).then_with(|| b.start_time.cmp(&a.start_time))),
        _ => list.sort_by(|a, b| a.event_date.cmp(&b.event_date).then_with(|| a.start_time.cmp(&b.start_time))),
    }
    list
}

pub async fn list_events<S: EventCommon>(store: &S, filter: &EventFilter) -> Result<Vec<Event>, Error> {
    let all = EventCommon::all(store).await?;
    Ok(filter_events(all, filter, Utc::now().date_naive()))
}

/// Public lookup; inactive events are hidden unless `include_inactive`.
pub async fn get_event<S: EventCommon>(store: &S, id: &str, include_inactive: bool) -> Result<Event, Error> {
    match EventCommon::get(store, id).await? {
        Some(e) if include_inactive || e.is_active => Ok(e),
        _ => Err(Error::NotFound(format!("event {}", id))),
    }
}
