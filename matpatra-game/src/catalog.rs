//! Fixed party-symbol catalog matching the proportional-representation
//! ballot layout: 5 columns by 12 rows, with the final two cells of the
//! last row left as empty decorative cells.

use serde::Serialize;

pub const GRID_COLS: u8 = 5;
pub const GRID_ROWS: u8 = 12;
/// Populated cells; the 12x5 grid has 60 cells, the last two stay empty.
pub const SYMBOL_COUNT: u8 = 58;

/// One immutable catalog entry: a party symbol slot on the ballot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolSlot {
    pub index: u8,
    pub name: &'static str,
    pub name_nepali: &'static str,
}

/// Convert a flat slot index into its `(row, col)` grid coordinate.
#[must_use]
pub const fn index_to_cell(index: u8) -> (u8, u8) {
    (index / GRID_COLS, index % GRID_COLS)
}

/// Look up the populated slot at a grid coordinate, if any.
#[must_use]
pub fn slot_at(row: u8, col: u8) -> Option<&'static SymbolSlot> {
    if col >= GRID_COLS {
        return None;
    }
    let index = usize::from(row) * usize::from(GRID_COLS) + usize::from(col);
    SYMBOL_CATALOG.get(index)
}

const fn slot(index: u8, name: &'static str, name_nepali: &'static str) -> SymbolSlot {
    SymbolSlot {
        index,
        name,
        name_nepali,
    }
}

pub const SYMBOL_CATALOG: [SymbolSlot; SYMBOL_COUNT as usize] = [
    // Row 0
    slot(0, "Sun", "सूर्य"),
    slot(1, "Tree", "रुख"),
    slot(2, "Star", "तारा"),
    slot(3, "Bell", "घण्टी"),
    slot(4, "Plow", "हलो"),
    // Row 1
    slot(5, "Umbrella", "छाता"),
    slot(6, "Megaphone", "माइक"),
    slot(7, "Bicycle", "साइकल"),
    slot(8, "Log", "काठ"),
    slot(9, "Cup", "गिलास"),
    // Row 2
    slot(10, "Eye", "आँखा"),
    slot(11, "Praying Hands", "नमस्ते"),
    slot(12, "Rooster", "भाले"),
    slot(13, "Pitcher", "गाग्री"),
    slot(14, "Open Hand", "हात"),
    // Row 3
    slot(15, "Basket", "डोको"),
    slot(16, "Hammer Sickle", "हँसिया हथौडा"),
    slot(17, "Lotus", "कमल"),
    slot(18, "Guitar", "गिटार"),
    slot(19, "House", "घर"),
    // Row 4
    slot(20, "Sickle", "हँसिया"),
    slot(21, "Torch", "मशाल"),
    slot(22, "Clock", "घडी"),
    slot(23, "Scissors", "कैंची"),
    slot(24, "Pickaxe", "कुदालो"),
    // Row 5
    slot(25, "Conch", "शंख"),
    slot(26, "Flower Pot", "फूलदानी"),
    slot(27, "Battery", "ब्याट्री"),
    slot(28, "Farmer", "किसान"),
    slot(29, "Hands Offering", "भेटी"),
    // Row 6
    slot(30, "Spectacles", "चश्मा"),
    slot(31, "Bee", "मौरी"),
    slot(32, "Meditating", "ध्यान"),
    slot(33, "Cupped Hands", "हत्केला"),
    slot(34, "Harvester", "किसानी"),
    // Row 7
    slot(35, "Trident", "त्रिशूल"),
    slot(36, "Horse", "घोडा"),
    slot(37, "Rose", "गुलाब"),
    slot(38, "Dharma Wheel", "धर्मचक्र"),
    slot(39, "Handshake", "हाथ मिलाई"),
    // Row 8
    slot(40, "Water Pump", "धारा"),
    slot(41, "Whistle", "सिट्ठी"),
    slot(42, "Stool", "पिरा"),
    slot(43, "Woman", "महिला"),
    slot(44, "Oil Lamp", "दियो"),
    // Row 9
    slot(45, "Bus", "बस"),
    slot(46, "Ball", "बल"),
    slot(47, "Vase", "कलश"),
    slot(48, "Star of David", "षट्कोण"),
    slot(49, "Grinding Stone", "जाँतो"),
    // Row 10
    slot(50, "Bottle", "बोतल"),
    slot(51, "Book", "किताब"),
    slot(52, "Endless Knot", "अनन्त"),
    slot(53, "Mobile Phone", "मोबाइल"),
    slot(54, "Peace Sign", "शान्ति"),
    // Row 11 (last row, only 3 populated cells)
    slot(55, "Lion", "सिंह"),
    slot(56, "Sailboat", "डुङ्गा"),
    slot(57, "Cow", "गाई"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_indices_are_sequential() {
        for (pos, entry) in SYMBOL_CATALOG.iter().enumerate() {
            assert_eq!(usize::from(entry.index), pos);
        }
    }

    #[test]
    fn index_to_cell_covers_grid() {
        assert_eq!(index_to_cell(0), (0, 0));
        assert_eq!(index_to_cell(4), (0, 4));
        assert_eq!(index_to_cell(5), (1, 0));
        assert_eq!(index_to_cell(57), (11, 2));
    }

    #[test]
    fn slot_at_rejects_decorative_and_out_of_bounds_cells() {
        assert_eq!(slot_at(0, 0).unwrap().name, "Sun");
        assert_eq!(slot_at(11, 2).unwrap().name, "Cow");
        assert!(slot_at(11, 3).is_none());
        assert!(slot_at(11, 4).is_none());
        assert!(slot_at(0, 5).is_none());
        assert!(slot_at(12, 0).is_none());
    }
}
