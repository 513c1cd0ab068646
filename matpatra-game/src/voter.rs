//! Voter profile strip data: deterministic flavor shown alongside each
//! ballot. Profiles never influence validity or scoring.

use serde::Serialize;

/// Profile card for the voter presenting the current ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoterProfile {
    pub name: &'static str,
    pub face: &'static str,
    pub district: &'static str,
    pub age: u8,
    pub voter_id: String,
}

struct VoterSeed {
    name: &'static str,
    face: &'static str,
    district: &'static str,
}

const VOTER_POOL: [VoterSeed; 20] = [
    VoterSeed { name: "Ram Bahadur Thapa", face: "👨", district: "Kathmandu" },
    VoterSeed { name: "Sita Kumari Sharma", face: "👩", district: "Lalitpur" },
    VoterSeed { name: "Krishna Pd. Adhikari", face: "👴", district: "Bhaktapur" },
    VoterSeed { name: "Laxmi Devi Gurung", face: "👵", district: "Kaski" },
    VoterSeed { name: "Bimal Raj Shrestha", face: "🧑", district: "Chitwan" },
    VoterSeed { name: "Sunita Rai", face: "👩", district: "Morang" },
    VoterSeed { name: "Hari Bahadur Karki", face: "👨", district: "Sunsari" },
    VoterSeed { name: "Manita Tamang", face: "👧", district: "Nuwakot" },
    VoterSeed { name: "Ganesh Pd. Poudel", face: "👴", district: "Gorkha" },
    VoterSeed { name: "Saraswati Devi Yadav", face: "👵", district: "Siraha" },
    VoterSeed { name: "Nabin Khadka", face: "👦", district: "Rupandehi" },
    VoterSeed { name: "Puja Magar", face: "👧", district: "Palpa" },
    VoterSeed { name: "Rajendra Prasad Shah", face: "👨", district: "Bara" },
    VoterSeed { name: "Kamala Kumari Tiwari", face: "👩", district: "Parsa" },
    VoterSeed { name: "Dipak Bahadur Rana", face: "🧑", district: "Dang" },
    VoterSeed { name: "Rekha Chaudhary", face: "👩", district: "Kailali" },
    VoterSeed { name: "Bikram Singh Basnet", face: "👨", district: "Jumla" },
    VoterSeed { name: "Gita Limbu", face: "👧", district: "Taplejung" },
    VoterSeed { name: "Suman Ale Magar", face: "🧑", district: "Myagdi" },
    VoterSeed { name: "Savita Pandey", face: "👩", district: "Dadeldhura" },
];

impl VoterProfile {
    /// Derive the profile presented with the ballot at `index`. Pure
    /// arithmetic so the strip is stable across re-renders.
    #[must_use]
    pub fn for_ballot(index: usize) -> Self {
        let base = &VOTER_POOL[index % VOTER_POOL.len()];
        let age = 18 + u8::try_from((index * 7 + 13) % 55).unwrap_or(0);
        let serial = (index * 3947 + 1021) % 99_999;
        Self {
            name: base.name,
            face: base.face,
            district: base.district,
            age,
            voter_id: format!("NEC-{serial:05}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_deterministic_per_index() {
        assert_eq!(VoterProfile::for_ballot(4), VoterProfile::for_ballot(4));
        assert_ne!(VoterProfile::for_ballot(0), VoterProfile::for_ballot(1));
    }

    #[test]
    fn pool_wraps_and_ages_stay_adult() {
        let wrapped = VoterProfile::for_ballot(20);
        assert_eq!(wrapped.name, VOTER_POOL[0].name);
        for index in 0..60 {
            let profile = VoterProfile::for_ballot(index);
            assert!((18..=72).contains(&profile.age));
            assert!(profile.voter_id.starts_with("NEC-"));
            assert_eq!(profile.voter_id.len(), 9);
        }
    }
}
