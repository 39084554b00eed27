use crate::models::{Itinerary, Stop};
use std::fmt::{self, Write};

const STAR: char = '★';

/// Human-readable plain-text itinerary summary.
pub fn render(itinerary: &Itinerary) -> String {
    itinerary.to_string()
}

fn stars(stop: &Stop) -> String {
    std::iter::repeat(STAR)
        .take(stop.business.star_count())
        .collect()
}

fn write_stop(f: &mut fmt::Formatter<'_>, stop: &Stop) -> fmt::Result {
    let business = &stop.business;

    write!(
        f,
        "  {}. {} ({})",
        stop.order_in_itinerary, business.name, business.category
    )?;
    if let Some(distance) = stop.distance_from_start_km {
        write!(f, " (~{} from start)", distance)?;
    }
    writeln!(f)?;
    writeln!(f, "     Rating: {} ({:.1}/5)", stars(stop), business.rating)?;
    writeln!(f, "     Address: {}", business.address)?;
    writeln!(f)
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => writeln!(f, "Journey from {} to {}", self.start.name, end.name)?,
            None => writeln!(f, "Journey from {}", self.start.name)?,
        }
        writeln!(f)?;

        writeln!(f, "Starting Point: {}", self.start.name)?;
        if let Some(end) = &self.end {
            writeln!(f, "Destination: {}", end.name)?;
        }
        if let Some(total) = self.total_distance_km {
            writeln!(f, "Total Distance: {}", total)?;
        }
        writeln!(f)?;

        if self.stops.is_empty() {
            writeln!(f, "No stops were selected for this itinerary.")?;
            writeln!(f)?;
        } else {
            writeln!(f, "Recommended Stops:")?;
            for stop in &self.stops {
                write_stop(f, stop)?;
            }
        }

        if !self.skipped_slots.is_empty() {
            let mut skipped = String::new();
            for (i, slot) in self.skipped_slots.iter().enumerate() {
                if i > 0 {
                    skipped.push_str(", ");
                }
                write!(skipped, "{}", slot.category)?;
            }
            writeln!(f, "Could not fill: {}", skipped)?;
            writeln!(f)?;
        }

        write!(f, "Happy travels!")
    }
}
