use crate::models::{ClockTime, LockState, Note, NotePatch, NoteUpdate, Weekday};

/// How a note presents itself at a given time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Open,
    Locked,
    OpensAt(ClockTime),
}

impl Status {
    pub fn is_closed(self) -> bool {
        !matches!(self, Status::Open)
    }

    pub fn label(self) -> String {
        match self {
            Status::Open => "Offen".to_string(),
            Status::Locked => "Gesperrt".to_string(),
            Status::OpensAt(t) => format!("Öffnet um {t}"),
        }
    }
}

impl LockState {
    pub fn status_at(self, now: ClockTime) -> Status {
        match self {
            LockState::Open => Status::Open,
            LockState::Locked => Status::Locked,
            LockState::Until(t) if now < t => Status::OpensAt(t),
            LockState::Until(_) => Status::Open,
        }
    }

    pub fn is_closed_at(self, now: ClockTime) -> bool {
        self.status_at(now).is_closed()
    }

    /// Lock button: anything closed opens, an open note locks permanently.
    pub fn toggled_at(self, now: ClockTime) -> LockState {
        if self.is_closed_at(now) {
            LockState::Open
        } else {
            LockState::Locked
        }
    }

    /// Scheduler open-time input: empty clears the lock.
    pub fn from_open_time_input(raw: &str) -> LockState {
        ClockTime::parse(raw)
            .map(LockState::Until)
            .unwrap_or(LockState::Open)
    }
}

/// Value of an "opens at" field: only a pending time, never the permanent lock.
pub(crate) fn open_time_value(lock: LockState) -> String {
    match lock {
        LockState::Until(t) => t.to_string(),
        LockState::Open | LockState::Locked => String::new(),
    }
}

/// Open notes of `today` whose auto-close time passed in `(last_tick, now]`,
/// as one bulk lock.
pub(crate) fn due_for_auto_close(
    notes: &[Note],
    today: Weekday,
    last_tick: ClockTime,
    now: ClockTime,
) -> Vec<NotePatch> {
    notes
        .iter()
        .filter(|n| n.fields.day == today)
        .filter(|n| !n.fields.closed_until.is_closed_at(now))
        .filter(|n| {
            n.fields
                .close_at
                .is_some_and(|t| passed_between(t, last_tick, now))
        })
        .map(|n| NotePatch::new(n.id, NoteUpdate::lock(LockState::Locked)))
        .collect()
}

/// `t` lies in `(from, to]`, wrapping over midnight when `to < from`.
fn passed_between(t: ClockTime, from: ClockTime, to: ClockTime) -> bool {
    if from <= to {
        from < t && t <= to
    } else {
        t > from || t <= to
    }
}

pub(crate) fn open_all(notes: &[Note]) -> Vec<NotePatch> {
    notes
        .iter()
        .filter(|n| n.fields.closed_until != LockState::Open)
        .map(|n| NotePatch::new(n.id, NoteUpdate::lock(LockState::Open)))
        .collect()
}

pub(crate) fn lock_all(notes: &[Note]) -> Vec<NotePatch> {
    notes
        .iter()
        .filter(|n| n.fields.closed_until == LockState::Open)
        .map(|n| NotePatch::new(n.id, NoteUpdate::lock(LockState::Locked)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteFields;

    fn t(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    fn note(id: i64, lock: LockState, close_at: Option<ClockTime>) -> Note {
        Note {
            id,
            fields: NoteFields {
                closed_until: lock,
                close_at,
                ..NoteFields::blank(Weekday::Montag, 0.0, 0.0, 240.0, 150.0, false)
            },
        }
    }

    #[test]
    fn test_status_at() {
        assert_eq!(LockState::Open.status_at(t(8, 0)), Status::Open);
        assert_eq!(LockState::Locked.status_at(t(8, 0)), Status::Locked);
        assert_eq!(
            LockState::Until(t(10, 30)).status_at(t(10, 29)),
            Status::OpensAt(t(10, 30))
        );
        assert_eq!(LockState::Until(t(10, 30)).status_at(t(10, 30)), Status::Open);
        assert_eq!(Status::OpensAt(t(9, 5)).label(), "Öffnet um 09:05");
    }

    #[test]
    fn test_toggle_lock() {
        assert_eq!(LockState::Open.toggled_at(t(8, 0)), LockState::Locked);
        assert_eq!(LockState::Locked.toggled_at(t(8, 0)), LockState::Open);
        assert_eq!(LockState::Until(t(9, 0)).toggled_at(t(8, 0)), LockState::Open);
        // An expired time lock counts as open.
        assert_eq!(LockState::Until(t(7, 0)).toggled_at(t(8, 0)), LockState::Locked);
    }

    #[test]
    fn test_open_time_input() {
        assert_eq!(
            LockState::from_open_time_input("11:45"),
            LockState::Until(t(11, 45))
        );
        assert_eq!(LockState::from_open_time_input(""), LockState::Open);
    }

    #[test]
    fn test_due_for_auto_close() {
        let notes = vec![
            note(1, LockState::Open, Some(t(10, 0))),
            note(2, LockState::Open, Some(t(11, 0))),
            note(3, LockState::Locked, Some(t(10, 0))),
            note(4, LockState::Open, None),
        ];
        let due = due_for_auto_close(&notes, Weekday::Montag, t(9, 59), t(10, 0));
        assert_eq!(due, vec![NotePatch::new(1, NoteUpdate::lock(LockState::Locked))]);

        // Already handled on the previous tick.
        assert!(due_for_auto_close(&notes, Weekday::Montag, t(10, 0), t(10, 1)).is_empty());
    }

    #[test]
    fn test_due_for_auto_close_only_today() {
        let mut friday = note(1, LockState::Open, Some(t(10, 0)));
        friday.fields.day = Weekday::Freitag;
        let notes = vec![friday];
        assert!(due_for_auto_close(&notes, Weekday::Montag, t(9, 59), t(10, 0)).is_empty());
        assert_eq!(
            due_for_auto_close(&notes, Weekday::Freitag, t(9, 59), t(10, 0)).len(),
            1
        );
    }

    #[test]
    fn test_due_for_auto_close_over_midnight() {
        let notes = vec![note(1, LockState::Open, Some(t(0, 0)))];
        assert_eq!(
            due_for_auto_close(&notes, Weekday::Montag, t(23, 59), t(0, 0)).len(),
            1
        );
    }

    #[test]
    fn test_open_time_hides_permanent_lock() {
        assert_eq!(open_time_value(LockState::Locked), "");
        assert_eq!(open_time_value(LockState::Open), "");
        assert_eq!(open_time_value(LockState::Until(t(7, 45))), "07:45");
    }

    #[test]
    fn test_open_and_lock_all() {
        let notes = vec![
            note(1, LockState::Open, None),
            note(2, LockState::Locked, None),
            note(3, LockState::Until(t(12, 0)), None),
        ];
        let ids: Vec<i64> = open_all(&notes).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
        let ids: Vec<i64> = lock_all(&notes).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
