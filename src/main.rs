// calgrid demo
// Seeds the in-memory store and renders a month grid and a day agenda
// as text for a chosen anchor date

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use calgrid::models::event::Event;
use calgrid::models::recurrence::Recurrence;
use calgrid::models::user::User;
use calgrid::services::calendar::{month_leading_blanks, CalendarService, ViewKind};
use calgrid::store::{
    AuthListener, AuthProvider, AuthUser, EventStore, MemoryStore, Session, Subscription,
};
use calgrid::utils::date::is_weekend;

const DEMO_UID: &str = "demo-user";

/// Auth double with one permanently signed-in identity.
struct DemoAuth {
    user: AuthUser,
}

impl DemoAuth {
    fn new(uid: &str) -> Self {
        let mut user = AuthUser::new(uid);
        user.email = Some(format!("{uid}@example.com"));
        user.email_verified = true;
        Self { user }
    }
}

impl AuthProvider for DemoAuth {
    fn register(&self, _email: &str, _password: &str) -> Result<AuthUser> {
        Ok(self.user.clone())
    }

    fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthUser> {
        Ok(self.user.clone())
    }

    fn sign_out(&self) -> Result<()> {
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        Some(self.user.clone())
    }

    fn on_auth_change(&self, listener: AuthListener) -> Subscription {
        listener(Some(&self.user));
        Subscription::noop()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting calgrid demo");

    let store = MemoryStore::new();
    seed(&store)?;

    let auth = DemoAuth::new(DEMO_UID);
    let session = match auth.current_user() {
        Some(identity) => {
            let profile = store.user(&identity.uid)?;
            Some(Session::new(identity, profile))
        }
        None => None,
    };
    if let Some(session) = &session {
        log::info!("Signed in as {}", session.display_name());
    }

    let anchor = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<NaiveDate>()
            .with_context(|| format!("Not a date (expected YYYY-MM-DD): {arg:?}"))?,
        None => "2025-03-10".parse::<NaiveDate>()?,
    };

    let service = CalendarService::new(&store);
    render_month(&service, session.as_ref(), anchor)?;
    println!();
    render_day(&service, session.as_ref(), anchor)?;
    Ok(())
}

fn seed(store: &MemoryStore) -> Result<()> {
    let mut profile = User::new(DEMO_UID, "demo", "demo@example.com");
    profile.first_name = "Demo".to_string();
    profile.last_name = "User".to_string();
    profile.phone_number = "0890000000".to_string();
    store.put_user(&profile)?;

    let seeds: [(&str, &str, &str, Option<Recurrence>); 11] = [
        ("Morning Standup", "2025-03-10T09:00:00", "2025-03-10T09:30:00", None),
        ("Project Meeting", "2025-03-10T10:30:00", "2025-03-10T12:00:00", None),
        ("Lunch Break", "2025-03-10T13:00:00", "2025-03-10T14:00:00", None),
        ("Client Presentation", "2025-03-10T15:00:00", "2025-03-10T16:30:00", None),
        ("Gym Workout", "2025-03-10T18:00:00", "2025-03-10T19:30:00", None),
        ("Dinner with Family", "2025-03-10T20:00:00", "2025-03-10T21:30:00", None),
        ("Overnight Hackathon", "2025-03-10T22:00:00", "2025-03-11T06:00:00", None),
        ("Weekend Trip", "2025-03-15T07:00:00", "2025-03-17T22:00:00", None),
        ("Daily Standup", "2025-03-10T09:00:00", "2025-03-10T09:15:00", Some(Recurrence::Daily)),
        ("Weekly Sync", "2025-03-11T10:00:00", "2025-03-11T10:30:00", Some(Recurrence::Weekly)),
        ("Monthly Check", "2025-03-15T14:00:00", "2025-03-15T15:00:00", Some(Recurrence::Monthly)),
    ];

    for (title, start, end, recurrence) in seeds {
        let mut builder = Event::builder()
            .title(title)
            .creator_id(DEMO_UID)
            .start(start.parse()?)
            .end(end.parse()?);
        if let Some(rule) = recurrence {
            builder = builder.recurrence(rule);
        }
        store.create_event(&builder.build()?)?;
    }

    log::info!("Seeded {} events", seeds.len());
    Ok(())
}

fn render_month<S: EventStore>(
    service: &CalendarService<'_, S>,
    session: Option<&Session>,
    anchor: NaiveDate,
) -> Result<()> {
    let counts = service.occurrence_counts(session, ViewKind::Month, anchor)?;

    println!("{}", anchor.format("%B %Y"));
    println!("Sun Mon Tue Wed Thu Fri Sat");

    let mut row: Vec<String> = Vec::new();
    for _ in 0..month_leading_blanks(anchor) {
        row.push("   ".to_string());
    }
    for (day, count) in counts {
        let marker = if count > 0 { '*' } else { ' ' };
        row.push(format!("{:>2}{marker}", day.day()));
        if row.len() == 7 {
            println!("{}", row.join(" "));
            row.clear();
        }
    }
    if !row.is_empty() {
        println!("{}", row.join(" "));
    }
    println!("(* = at least one occurrence)");
    Ok(())
}

fn render_day<S: EventStore>(
    service: &CalendarService<'_, S>,
    session: Option<&Session>,
    anchor: NaiveDate,
) -> Result<()> {
    let blocks = service.day_blocks(session, anchor)?;

    let weekend = if is_weekend(anchor) { " (weekend)" } else { "" };
    println!("Agenda for {anchor}{weekend}");
    if blocks.is_empty() {
        println!("  (nothing scheduled)");
        return Ok(());
    }
    for block in blocks {
        let continued = if block.continued { "  (multi-day)" } else { "" };
        println!(
            "  {} - {}  {}{continued}",
            block.start.format("%H:%M"),
            block.end.format("%H:%M"),
            block.title,
        );
    }
    Ok(())
}
