use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const DEFAULT_COLOR: &str = "#ffffe0";
pub(crate) const DEFAULT_FONT: &str = "'Kalam', cursive";
pub(crate) const DEFAULT_TITLE_SIZE: u32 = 16;
pub(crate) const DEFAULT_BODY_SIZE: u32 = 14;
pub(crate) const DEFAULT_TITLE: &str = "Neuer Zettel";

const LOCKED_MARKER: &str = "LOCKED";

/// PostgREST sends `null` for unset columns; treat those like missing keys.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn lenient_clock_time<'de, D>(d: D) -> Result<Option<ClockTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(ClockTime::parse))
}

fn default_width() -> f64 {
    240.0
}

fn default_height() -> f64 {
    150.0
}

fn width_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or_else(default_width))
}

fn height_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or_else(default_height))
}

/// Weekday label used as the `day` column.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub(crate) enum Weekday {
    Sonntag,
    Montag,
    Dienstag,
    Mittwoch,
    Donnerstag,
    Freitag,
    Samstag,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sonntag,
        Weekday::Montag,
        Weekday::Dienstag,
        Weekday::Mittwoch,
        Weekday::Donnerstag,
        Weekday::Freitag,
        Weekday::Samstag,
    ];

    /// Index as returned by `Date.prototype.getDay()` (0 = Sunday).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Samstag | Weekday::Sonntag)
    }

    /// The board opens on today, except on weekends where it opens on Monday.
    pub fn default_for(today_index: usize) -> Self {
        let day = Self::from_index(today_index);
        if day.is_weekend() {
            Weekday::Montag
        } else {
            day
        }
    }

    /// Step forward (`direction > 0`) or backward, skipping Saturday and Sunday.
    pub fn step_school_day(self, direction: i32) -> Self {
        let delta = if direction >= 0 { 1 } else { 6 };
        let mut index = self.index();
        loop {
            index = (index + delta) % 7;
            let day = Self::from_index(index);
            if !day.is_weekend() {
                return day;
            }
        }
    }
}

/// Wall-clock time of day with minute precision, stored as `HH:MM`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Accepts `HH:MM` (time inputs) and `HH:MM:SS` (database `time` columns).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
            .and_then(|t| Self::new(t.hour(), t.minute()))
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}

/// Scheduling state stored in `closedUntil`.
///
/// `null` is open, `"LOCKED"` is closed until someone opens it, and a time
/// of day keeps the note closed until that time.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub(crate) enum LockState {
    #[default]
    Open,
    Locked,
    Until(ClockTime),
}

impl From<Option<String>> for LockState {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            None | Some("") => LockState::Open,
            Some(LOCKED_MARKER) => LockState::Locked,
            // Unknown values keep the note closed rather than exposing it.
            Some(other) => ClockTime::parse(other)
                .map(LockState::Until)
                .unwrap_or(LockState::Locked),
        }
    }
}

impl From<LockState> for Option<String> {
    fn from(state: LockState) -> Self {
        match state {
            LockState::Open => None,
            LockState::Locked => Some(LOCKED_MARKER.to_string()),
            LockState::Until(t) => Some(t.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumIter)]
pub(crate) enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextAlign::Left => "Links",
            TextAlign::Center => "Zentriert",
            TextAlign::Right => "Rechts",
        }
    }

    pub fn from_css(raw: &str) -> Self {
        match raw.trim() {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }
}

impl Serialize for TextAlign {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_css())
    }
}

impl<'de> Deserialize<'de> for TextAlign {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().map(Self::from_css).unwrap_or_default())
    }
}

/// Font families offered by the side editor: (css value, label).
pub(crate) const FONTS: [(&str, &str); 9] = [
    ("'Kalam', cursive", "Kalam"),
    ("'Roboto', sans-serif", "Roboto"),
    ("'Poppins', sans-serif", "Poppins"),
    ("'Playfair Display', serif", "Playfair Display"),
    ("'Special Elite', monospace", "Special Elite"),
    ("'Source Code Pro', monospace", "Source Code"),
    ("'Caveat', cursive", "Caveat"),
    ("'Pacifico', cursive", "Pacifico"),
    ("'Lobster', cursive", "Lobster"),
];

/// Full palette of the note menu; the context menu shows the first 12.
pub(crate) const NOTE_COLORS: [&str; 24] = [
    "#ffffff", "#ffffe0", "#d4edda", "#cce5ff", "#fff3cd", "#f8d7da", "#e9d5ff", "#cffafe",
    "#dcfce7", "#fef08a", "#fed7aa", "#fecdd3", "#e5e7eb", "#bfdbfe", "#fca5a5", "#d9f99d",
    "#f87171", "#fbbf24", "#a3e635", "#4ade80", "#38bdf8", "#818cf8", "#c084fc", "#f472b6",
];

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Chalkboard,
    Space,
    Sweets,
    Dino,
    Agent,
    Vfb,
    Pokemon,
    Pokemon2,
    Pippi,
    Magictimals,
    Minecraft,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Chalkboard => "Kreidetafel",
            Theme::Space => "Weltraum",
            Theme::Sweets => "Süßigkeiten",
            Theme::Dino => "Dinos",
            Theme::Agent => "Agenten",
            Theme::Vfb => "VfB",
            Theme::Pokemon => "Pokémon",
            Theme::Pokemon2 => "Pokémon 2",
            Theme::Pippi => "Pippi",
            Theme::Magictimals => "Magictimals",
            Theme::Minecraft => "Minecraft",
        }
    }
}

/// Every column of a `zettel` row except the id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct NoteFields {
    pub day: Weekday,

    /// Title (may contain HTML).
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Body text (may contain HTML).
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(default = "default_width", deserialize_with = "width_or_default")]
    pub width: f64,
    #[serde(default = "default_height", deserialize_with = "height_or_default")]
    pub height: f64,

    #[serde(rename = "closedUntil", default)]
    pub closed_until: LockState,

    #[serde(rename = "closeAt", default, deserialize_with = "lenient_clock_time")]
    pub close_at: Option<ClockTime>,

    #[serde(default)]
    pub name_fs: Option<u32>,
    #[serde(default)]
    pub activity_fs: Option<u32>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub has_image: bool,
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_position_locked: bool,

    #[serde(default)]
    pub name_font: Option<String>,
    #[serde(default)]
    pub activity_font: Option<String>,
    #[serde(default)]
    pub name_align: TextAlign,
    #[serde(default)]
    pub activity_align: TextAlign,
}

/// Insert payload: a note before the store assigned an id.
pub(crate) type NewNote = NoteFields;

impl NoteFields {
    /// A blank note as created from the add button.
    pub fn blank(day: Weekday, x: f64, y: f64, width: f64, height: f64, with_image: bool) -> Self {
        Self {
            day,
            name: DEFAULT_TITLE.to_string(),
            activity: String::new(),
            x,
            y,
            width,
            height,
            closed_until: LockState::Open,
            close_at: None,
            name_fs: Some(DEFAULT_TITLE_SIZE),
            activity_fs: Some(DEFAULT_BODY_SIZE),
            has_image: with_image,
            image: None,
            color: Some(DEFAULT_COLOR.to_string()),
            is_position_locked: false,
            name_font: Some(DEFAULT_FONT.to_string()),
            activity_font: Some(DEFAULT_FONT.to_string()),
            name_align: TextAlign::Left,
            activity_align: TextAlign::Left,
        }
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    pub fn title_size(&self) -> u32 {
        self.name_fs.filter(|s| *s > 0).unwrap_or(DEFAULT_TITLE_SIZE)
    }

    pub fn body_size(&self) -> u32 {
        self.activity_fs.filter(|s| *s > 0).unwrap_or(DEFAULT_BODY_SIZE)
    }

    pub fn title_font(&self) -> &str {
        self.name_font.as_deref().unwrap_or(DEFAULT_FONT)
    }

    pub fn body_font(&self) -> &str {
        self.activity_font.as_deref().unwrap_or(DEFAULT_FONT)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Note {
    pub id: i64,

    #[serde(flatten)]
    pub fields: NoteFields,
}

impl Note {
    /// Copy of this note as it is pasted elsewhere: open, unpinned, no image.
    pub fn duplicate(&self) -> NewNote {
        NewNote {
            closed_until: LockState::Open,
            is_position_locked: false,
            has_image: false,
            image: None,
            ..self.fields.clone()
        }
    }

    /// Copy of this note as a whole day is copied: everything but the id.
    pub fn without_id(&self) -> NewNote {
        self.fields.clone()
    }

    /// Apply a partial update in place (optimistic local write).
    pub fn apply(&mut self, update: &NoteUpdate) {
        let f = &mut self.fields;
        if let Some(day) = update.day {
            f.day = day;
        }
        if let Some(v) = &update.name {
            f.name = v.clone();
        }
        if let Some(v) = &update.activity {
            f.activity = v.clone();
        }
        if let Some(v) = update.x {
            f.x = v;
        }
        if let Some(v) = update.y {
            f.y = v;
        }
        if let Some(v) = update.width {
            f.width = v;
        }
        if let Some(v) = update.height {
            f.height = v;
        }
        if let Some(v) = update.closed_until {
            f.closed_until = v;
        }
        if let Some(v) = update.close_at {
            f.close_at = v;
        }
        if let Some(v) = update.name_fs {
            f.name_fs = Some(v);
        }
        if let Some(v) = update.activity_fs {
            f.activity_fs = Some(v);
        }
        if let Some(v) = update.has_image {
            f.has_image = v;
        }
        if let Some(v) = &update.image {
            f.image = v.clone();
        }
        if let Some(v) = &update.color {
            f.color = Some(v.clone());
        }
        if let Some(v) = update.is_position_locked {
            f.is_position_locked = v;
        }
        if let Some(v) = &update.name_font {
            f.name_font = Some(v.clone());
        }
        if let Some(v) = &update.activity_font {
            f.activity_font = Some(v.clone());
        }
        if let Some(v) = update.name_align {
            f.name_align = v;
        }
        if let Some(v) = update.activity_align {
            f.activity_align = v;
        }
    }
}

/// Partial row update. Only `Some` fields are sent; `Some(None)` writes `null`.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "closedUntil", skip_serializing_if = "Option::is_none")]
    pub closed_until: Option<LockState>,
    #[serde(rename = "closeAt", skip_serializing_if = "Option::is_none")]
    pub close_at: Option<Option<ClockTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_fs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_fs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_image: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_position_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_align: Option<TextAlign>,
}

impl NoteUpdate {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn lock(state: LockState) -> Self {
        Self {
            closed_until: Some(state),
            ..Default::default()
        }
    }

    pub fn close_at(time: Option<ClockTime>) -> Self {
        Self {
            close_at: Some(time),
            ..Default::default()
        }
    }

    pub fn color(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn position_lock(locked: bool) -> Self {
        Self {
            is_position_locked: Some(locked),
            ..Default::default()
        }
    }

    pub fn image(url: Option<String>) -> Self {
        Self {
            has_image: Some(url.is_some()),
            image: Some(url),
            ..Default::default()
        }
    }
}

/// One row of a bulk upsert: the id plus the changed columns.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub(crate) struct NotePatch {
    pub id: i64,
    #[serde(flatten)]
    pub update: NoteUpdate,
}

impl NotePatch {
    pub fn new(id: i64, update: NoteUpdate) -> Self {
        Self { id, update }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "day": "Dienstag",
            "name": "<b>Mathe</b>",
            "activity": "Seite 12",
            "x": 30,
            "y": 40.5,
            "width": 240,
            "height": 150,
            "closedUntil": "10:30",
            "closeAt": null,
            "name_fs": 18,
            "activity_fs": null,
            "has_image": false,
            "image": null,
            "color": "#cce5ff",
            "is_position_locked": null,
            "name_font": null,
            "activity_font": "'Roboto', sans-serif",
            "name_align": "center",
            "activity_align": null
        })
    }

    #[test]
    fn test_note_row_deserializes_with_nulls() {
        let note: Note = serde_json::from_value(row_json()).expect("row should parse");
        assert_eq!(note.id, 7);
        assert_eq!(note.fields.day, Weekday::Dienstag);
        assert_eq!(note.fields.x, 30.0);
        assert_eq!(note.fields.y, 40.5);
        assert_eq!(
            note.fields.closed_until,
            LockState::Until(ClockTime::new(10, 30).unwrap())
        );
        assert_eq!(note.fields.close_at, None);
        assert_eq!(note.fields.title_size(), 18);
        assert_eq!(note.fields.body_size(), DEFAULT_BODY_SIZE);
        assert!(!note.fields.is_position_locked);
        assert_eq!(note.fields.title_font(), DEFAULT_FONT);
        assert_eq!(note.fields.name_align, TextAlign::Center);
        assert_eq!(note.fields.activity_align, TextAlign::Left);
    }

    #[test]
    fn test_note_row_missing_optional_columns() {
        let note: Note = serde_json::from_value(serde_json::json!({
            "id": 1,
            "day": "Montag"
        }))
        .expect("minimal row should parse");
        assert_eq!(note.fields.width, 240.0);
        assert_eq!(note.fields.height, 150.0);
        assert_eq!(note.fields.closed_until, LockState::Open);
        assert_eq!(note.fields.color(), DEFAULT_COLOR);
    }

    #[test]
    fn test_lock_state_wire_values() {
        assert_eq!(LockState::from(None), LockState::Open);
        assert_eq!(LockState::from(Some("LOCKED".into())), LockState::Locked);
        assert_eq!(
            LockState::from(Some("07:05:00".into())),
            LockState::Until(ClockTime::new(7, 5).unwrap())
        );
        // Garbage stays closed.
        assert_eq!(LockState::from(Some("bald".into())), LockState::Locked);

        let v = serde_json::to_value(LockState::Until(ClockTime::new(9, 0).unwrap())).unwrap();
        assert_eq!(v, serde_json::json!("09:00"));
        assert_eq!(serde_json::to_value(LockState::Open).unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_update_serializes_only_changed_fields() {
        let v = serde_json::to_value(NoteUpdate::position(10.0, 20.0)).unwrap();
        assert_eq!(v, serde_json::json!({"x": 10.0, "y": 20.0}));

        let v = serde_json::to_value(NoteUpdate::lock(LockState::Open)).unwrap();
        assert_eq!(v, serde_json::json!({"closedUntil": null}));

        let v = serde_json::to_value(NoteUpdate::close_at(None)).unwrap();
        assert_eq!(v, serde_json::json!({"closeAt": null}));

        let v = serde_json::to_value(NoteUpdate::image(None)).unwrap();
        assert_eq!(v, serde_json::json!({"has_image": false, "image": null}));
    }

    #[test]
    fn test_patch_flattens_id_and_fields() {
        let patch = NotePatch::new(3, NoteUpdate::lock(LockState::Locked));
        let v = serde_json::to_value(patch).unwrap();
        assert_eq!(v, serde_json::json!({"id": 3, "closedUntil": "LOCKED"}));
    }

    #[test]
    fn test_new_note_has_no_id() {
        let new = NoteFields::blank(Weekday::Freitag, 10.0, 10.0, 240.0, 280.0, true);
        let v = serde_json::to_value(&new).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["day"], "Freitag");
        assert_eq!(v["name"], DEFAULT_TITLE);
        assert_eq!(v["has_image"], true);
        assert_eq!(v["closedUntil"], serde_json::Value::Null);
        assert_eq!(v["name_align"], "left");
    }

    #[test]
    fn test_apply_update() {
        let mut note: Note = serde_json::from_value(row_json()).unwrap();
        note.apply(&NoteUpdate::position(5.0, 6.0));
        note.apply(&NoteUpdate::lock(LockState::Open));
        note.apply(&NoteUpdate::image(Some("https://x/y.png".into())));
        assert_eq!((note.fields.x, note.fields.y), (5.0, 6.0));
        assert_eq!(note.fields.closed_until, LockState::Open);
        assert!(note.fields.has_image);
        assert_eq!(note.fields.image.as_deref(), Some("https://x/y.png"));
        assert_eq!(note.fields.color(), "#cce5ff");
    }

    #[test]
    fn test_duplicate_is_open_and_unpinned() {
        let mut note: Note = serde_json::from_value(row_json()).unwrap();
        note.fields.is_position_locked = true;
        note.fields.image = Some("https://x/y.png".into());
        note.fields.has_image = true;

        let copy = note.duplicate();
        assert_eq!(copy.closed_until, LockState::Open);
        assert!(!copy.is_position_locked);
        assert!(!copy.has_image);
        assert!(copy.image.is_none());
        assert_eq!(copy.name, note.fields.name);

        let day_copy = note.without_id();
        assert!(day_copy.has_image);
    }

    #[test]
    fn test_weekday_navigation_skips_weekend() {
        assert_eq!(Weekday::Freitag.step_school_day(1), Weekday::Montag);
        assert_eq!(Weekday::Montag.step_school_day(-1), Weekday::Freitag);
        assert_eq!(Weekday::Dienstag.step_school_day(1), Weekday::Mittwoch);
        assert_eq!(Weekday::default_for(0), Weekday::Montag);
        assert_eq!(Weekday::default_for(6), Weekday::Montag);
        assert_eq!(Weekday::default_for(3), Weekday::Mittwoch);
        assert_eq!(Weekday::Donnerstag.to_string(), "Donnerstag");
    }

    #[test]
    fn test_theme_wire_names() {
        assert_eq!(Theme::Pokemon2.as_ref(), "pokemon2");
        assert_eq!("magictimals".parse::<Theme>().ok(), Some(Theme::Magictimals));
        assert_eq!(
            serde_json::to_value(Theme::Chalkboard).unwrap(),
            serde_json::json!("chalkboard")
        );
    }
}
