//! Game text
//!
//! Static strings shown by the scene and the screens around it.

pub const TITLE: &str = "Mission MouthPossible";
pub const SUBTITLE: &str = "Grab life by the tooth.";
pub const START: &str = "Start Game";
pub const HAS_WON_BADGE: &str = "The Maw has triumphed before!";

pub const LEVEL_COMPLETE: &str = "Level complete!";
pub const EXIT: &str = "Exit";
pub const EXIT_CONFIRM: &str = "Exit Game?";
pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const CONGRATULATIONS: &str = "MISSION ACCOMPLISHED!";
pub const WIN_MESSAGE: &str = "The Maw is unstoppable!\n\
With these contraband chompers, you've become\n\
dental history's most fearsome set of teeth.\n\n\
The Flossophy Institute trembles...\n\
Long live The Maw!";
pub const RETURN_TO_TITLE: &str = "Return to Title";

pub const INTRO_CONTINUE: &str = "Continue...";
pub const INTRO_START: &str = "Let's Get Chewing!";

/// Story screens shown before the first level
pub const INTRO_SCREENS: [&str; 4] = [
    "In a world saturated with saccharine smiles... one mouth felt... empty. Not just emotionally, but like, literally. Gums like vacant lots.",
    "This mouth, known only as 'The Maw', dreamt of a grin so sharp, so complete, it could cut glass... or at least aggressively chew gum.",
    "Suddenly, whispers on the slobbery breeze... Runaway teeth! Escaped from the tyrannical rule of the Flossophy Institute! These rogue chompers were hiding, yearning for a purpose... a purpose The Maw could provide.",
    "Your mission: Help The Maw achieve MAXIMUM TOOTHINESS. Hunt down those pearly escapees. Build the most gloriously overpopulated smile imaginable!",
];

/// Flavor text after each level, indexed by `level - 1`
pub const LEVEL_MESSAGES: [&str; 16] = [
    "The Flossophy Institute's security cameras caught nothing but a blur of gums. You're getting away with it!",
    "Another successful tooth heist! The Dental Detective Division is baffled.",
    "The Maw's power grows... Soon Big Dental will tremble!",
    "Breaking News: Mysterious Mouth Menace Strikes Again! Orthodontists Hate This One Weird Trick!",
    "The Flossophy Institute has deployed their elite Cavity SWAT team. Too bad they're looking in the wrong place!",
    "Your reputation spreads through the underground tooth trade. They call you 'The Dental Desperado'!",
    "The Institute's Chief of Incisors is pulling his hair out. Literally. He's now bald AND toothless.",
    "Local dentists report a surge in teeth requesting political asylum. The revolution has begun!",
    "The Maw's collection grows more powerful. You can now chew through diamonds... theoretically.",
    "Intercepted Institute Memo: 'WHO IS STEALING ALL THESE TEETH? And why do they make such good use of them?'",
    "The tooth fairy has put a bounty on your head. But she'll never catch you - her wings are too slow!",
    "You've become an inspiration to oppressed teeth everywhere. They're literally jumping ship from other mouths!",
    "The Institute's attempting to pass anti-tooth-hoarding legislation. But you operate outside the law!",
    "Dental hygienists speak your name in whispers: 'The One Who Chomps'",
    "Your mouth has become a sanctuary for refugee teeth. A regular United Nations of Gnashers!",
    "The Institute's worst nightmare continues... and you're living the dream!",
];

/// Message for completing `level`; levels past the table reuse the last entry
pub fn completion_message(level: u32) -> &'static str {
    let index = (level.max(1) as usize - 1).min(LEVEL_MESSAGES.len() - 1);
    LEVEL_MESSAGES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_message_indexing() {
        assert_eq!(completion_message(1), LEVEL_MESSAGES[0]);
        assert_eq!(completion_message(16), LEVEL_MESSAGES[15]);
    }

    #[test]
    fn test_completion_message_clamps() {
        assert_eq!(completion_message(17), LEVEL_MESSAGES[15]);
        assert_eq!(completion_message(500), LEVEL_MESSAGES[15]);
        // Level 0 never happens, but must not underflow
        assert_eq!(completion_message(0), LEVEL_MESSAGES[0]);
    }
}
