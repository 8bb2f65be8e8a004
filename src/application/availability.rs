//! Rooms eligible for a new reservation

use crate::domain::Room;

/// Rooms whose status is `available`, in their original order.
///
/// Unknown statuses count as unavailable.
pub fn select_available(rooms: &[Room]) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| room.status.is_available())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomStatus;
    use rust_decimal::Decimal;

    fn room(id: i64, status: RoomStatus) -> Room {
        Room::new(id, "double", status, Decimal::new(10000, 2))
    }

    #[test]
    fn keeps_available_rooms_in_order() {
        let rooms = vec![
            room(1, RoomStatus::Available),
            room(2, RoomStatus::Occupied),
            room(3, RoomStatus::Available),
        ];
        let ids: Vec<i64> = select_available(&rooms).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(select_available(&[]).is_empty());
    }

    #[test]
    fn unknown_and_maintenance_are_excluded() {
        let rooms = vec![
            room(4, RoomStatus::Maintenance),
            room(5, RoomStatus::Unknown("reservada".into())),
        ];
        assert!(select_available(&rooms).is_empty());
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let statuses = [
            RoomStatus::Occupied,
            RoomStatus::Available,
            RoomStatus::Maintenance,
            RoomStatus::Available,
            RoomStatus::Available,
            RoomStatus::Unknown("x".into()),
            RoomStatus::Occupied,
            RoomStatus::Available,
        ];
        let rooms: Vec<Room> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| room(i as i64 * 7 % 5, s.clone()))
            .collect();

        let selected = select_available(&rooms);
        assert!(selected.len() <= rooms.len());
        assert!(selected.iter().all(|r| r.status == RoomStatus::Available));

        // every selected room appears in the input after the previous one
        let mut cursor = 0;
        for picked in &selected {
            let pos = rooms[cursor..]
                .iter()
                .position(|r| r == picked)
                .expect("selected room must come from the input");
            cursor += pos + 1;
        }
        assert_eq!(selected.len(), 4);
    }
}
