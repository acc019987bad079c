//! Popup content for a zone marker.
//!
//! Labels are the Russian UI strings shown by the map front end. Counts are
//! clamped at zero for display only; the model keeps the raw value.

use serde::Serialize;

use crate::classify::FreeSpotLevel;
use crate::models::Zone;

const UNKNOWN: &str = "нет данных";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub title: String,
    pub rows: Vec<PopupRow>,
    /// Colour for the free-spot row.
    pub free_spot_color: &'static str,
}

fn row(label: &'static str, value: impl Into<String>) -> PopupRow {
    PopupRow {
        label,
        value: value.into(),
    }
}

/// Display text for a zone's free spots: clamped count, or "нет данных".
pub fn free_spots_label(zone: &Zone) -> String {
    zone.free_spots()
        .map(|n| n.max(0).to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn pay_label(pay: i64) -> String {
    if pay <= 0 {
        "бесплатно".to_string()
    } else {
        format!("{pay} ₽/ч")
    }
}

pub fn zone_popup(zone: &Zone) -> Popup {
    let mut rows = vec![
        row("Вместимость", zone.capacity.to_string()),
        row(
            "Занято",
            zone.occupied
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        ),
        row("Свободно", free_spots_label(zone)),
        row("Оплата", pay_label(zone.pay)),
    ];
    if let Some(confidence) = zone.confidence {
        rows.push(row("Точность", format!("{:.0}%", confidence * 100.0)));
    }
    if let Some(camera_id) = zone.camera_id {
        rows.push(row("Камера", format!("№{camera_id}")));
    }

    Popup {
        title: format!("Зона {}", zone.zone_id),
        rows,
        free_spot_color: FreeSpotLevel::from_free_spots(zone.free_spots()).color(),
    }
}
