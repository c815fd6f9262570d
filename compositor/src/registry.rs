//! Semantic style keys and the Tailwind utilities they produce.
//!
//! A non-literal selector renders value `v` as `{class}-{v}`; a literal
//! selector renders the value as the class itself (`display = hidden`).
//! Either kind renders `true` as the bare `class`.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    /// Utility prefix without the trailing dash; also the bare class.
    pub class: &'static str,
    /// The value is the complete class name.
    pub literal: bool,
    /// `!v` renders as `-{class}-{v}`.
    pub negative: bool,
}

impl Selector {
    const fn prefixed(class: &'static str) -> Self {
        Selector {
            class,
            literal: false,
            negative: false,
        }
    }

    const fn signed(class: &'static str) -> Self {
        Selector {
            class,
            literal: false,
            negative: true,
        }
    }

    const fn literal(class: &'static str) -> Self {
        Selector {
            class,
            literal: true,
            negative: false,
        }
    }
}

const SELECTORS: &[(&str, Selector)] = &[
    // Typography
    ("fontFAMILY", Selector::prefixed("font")),
    ("fontWEIGHT", Selector::prefixed("font")),
    ("fontSTYLE", Selector::literal("italic")),
    ("fontSMOOTHING", Selector::literal("antialiased")),
    ("fontVARIANTNUMERIC", Selector::literal("tabular-nums")),
    ("textSIZE", Selector::prefixed("text")),
    ("textCOLOR", Selector::prefixed("text")),
    ("textOPACITY", Selector::prefixed("text-opacity")),
    ("textALIGN", Selector::prefixed("text")),
    ("textDECORATION", Selector::literal("underline")),
    ("textTRANSFORM", Selector::literal("uppercase")),
    ("textOVERFLOW", Selector::literal("truncate")),
    ("textWRAP", Selector::prefixed("text")),
    ("textINDENT", Selector::signed("indent")),
    ("textSHADOW", Selector::prefixed("text-shadow")),
    ("lineHEIGHT", Selector::prefixed("leading")),
    ("letterSPACING", Selector::signed("tracking")),
    ("lineCLAMP", Selector::prefixed("line-clamp")),
    ("whitespace", Selector::prefixed("whitespace")),
    ("wordBREAK", Selector::prefixed("break")),
    ("hyphens", Selector::prefixed("hyphens")),
    ("verticalALIGN", Selector::prefixed("align")),
    ("decorationCOLOR", Selector::prefixed("decoration")),
    ("decorationSTYLE", Selector::prefixed("decoration")),
    ("decorationTHICKNESS", Selector::prefixed("decoration")),
    ("underlineOFFSET", Selector::prefixed("underline-offset")),
    ("listSTYLETYPE", Selector::prefixed("list")),
    ("listSTYLEPOSITION", Selector::prefixed("list")),
    ("listSTYLEIMAGE", Selector::prefixed("list-image")),
    ("placeholderCOLOR", Selector::prefixed("placeholder")),
    ("caretCOLOR", Selector::prefixed("caret")),
    ("accentCOLOR", Selector::prefixed("accent")),
    ("content", Selector::prefixed("content")),
    // Spacing
    ("p", Selector::prefixed("p")),
    ("px", Selector::prefixed("px")),
    ("py", Selector::prefixed("py")),
    ("pt", Selector::prefixed("pt")),
    ("pr", Selector::prefixed("pr")),
    ("pb", Selector::prefixed("pb")),
    ("pl", Selector::prefixed("pl")),
    ("m", Selector::signed("m")),
    ("mx", Selector::signed("mx")),
    ("my", Selector::signed("my")),
    ("mt", Selector::signed("mt")),
    ("mr", Selector::signed("mr")),
    ("mb", Selector::signed("mb")),
    ("ml", Selector::signed("ml")),
    ("spaceX", Selector::signed("space-x")),
    ("spaceY", Selector::signed("space-y")),
    ("spaceXREVERSE", Selector::literal("space-x-reverse")),
    ("spaceYREVERSE", Selector::literal("space-y-reverse")),
    ("gap", Selector::prefixed("gap")),
    ("gapX", Selector::prefixed("gap-x")),
    ("gapY", Selector::prefixed("gap-y")),
    // Sizing
    ("w", Selector::prefixed("w")),
    ("h", Selector::prefixed("h")),
    ("size", Selector::prefixed("size")),
    ("minW", Selector::prefixed("min-w")),
    ("minH", Selector::prefixed("min-h")),
    ("maxW", Selector::prefixed("max-w")),
    ("maxH", Selector::prefixed("max-h")),
    ("aspectRATIO", Selector::prefixed("aspect")),
    // Layout
    ("display", Selector::literal("block")),
    ("position", Selector::literal("relative")),
    ("visibility", Selector::literal("visible")),
    ("isolation", Selector::literal("isolate")),
    ("boxSIZING", Selector::prefixed("box")),
    ("boxDECORATIONBREAK", Selector::prefixed("box-decoration")),
    ("float", Selector::prefixed("float")),
    ("clear", Selector::prefixed("clear")),
    ("columns", Selector::prefixed("columns")),
    ("container", Selector::literal("container")),
    ("inset", Selector::signed("inset")),
    ("insetX", Selector::signed("inset-x")),
    ("insetY", Selector::signed("inset-y")),
    ("top", Selector::signed("top")),
    ("right", Selector::signed("right")),
    ("bottom", Selector::signed("bottom")),
    ("left", Selector::signed("left")),
    ("zIndex", Selector::signed("z")),
    ("overflow", Selector::prefixed("overflow")),
    ("overflowX", Selector::prefixed("overflow-x")),
    ("overflowY", Selector::prefixed("overflow-y")),
    ("overscroll", Selector::prefixed("overscroll")),
    ("objectFIT", Selector::prefixed("object")),
    ("objectPOSITION", Selector::prefixed("object")),
    // Flex and grid
    ("flexDIRECTION", Selector::prefixed("flex")),
    ("flexWRAP", Selector::prefixed("flex")),
    ("flex", Selector::prefixed("flex")),
    ("flexBASIS", Selector::prefixed("basis")),
    ("flexGROW", Selector::prefixed("grow")),
    ("flexSHRINK", Selector::prefixed("shrink")),
    ("order", Selector::signed("order")),
    ("gridCOLS", Selector::prefixed("grid-cols")),
    ("gridROWS", Selector::prefixed("grid-rows")),
    ("gridFLOW", Selector::prefixed("grid-flow")),
    ("autoCOLS", Selector::prefixed("auto-cols")),
    ("autoROWS", Selector::prefixed("auto-rows")),
    ("colSPAN", Selector::prefixed("col-span")),
    ("colSTART", Selector::prefixed("col-start")),
    ("colEND", Selector::prefixed("col-end")),
    ("rowSPAN", Selector::prefixed("row-span")),
    ("rowSTART", Selector::prefixed("row-start")),
    ("rowEND", Selector::prefixed("row-end")),
    ("justifyCONTENT", Selector::prefixed("justify")),
    ("justifyITEMS", Selector::prefixed("justify-items")),
    ("justifySELF", Selector::prefixed("justify-self")),
    ("alignCONTENT", Selector::prefixed("content")),
    ("alignITEMS", Selector::prefixed("items")),
    ("alignSELF", Selector::prefixed("self")),
    ("placeCONTENT", Selector::prefixed("place-content")),
    ("placeITEMS", Selector::prefixed("place-items")),
    ("placeSELF", Selector::prefixed("place-self")),
    // Backgrounds
    ("bgCOLOR", Selector::prefixed("bg")),
    ("bgOPACITY", Selector::prefixed("bg-opacity")),
    ("bgATTACHMENT", Selector::prefixed("bg")),
    ("bgCLIP", Selector::prefixed("bg-clip")),
    ("bgORIGIN", Selector::prefixed("bg-origin")),
    ("bgPOSITION", Selector::prefixed("bg")),
    ("bgREPEAT", Selector::prefixed("bg")),
    ("bgSIZE", Selector::prefixed("bg")),
    ("bgIMAGE", Selector::prefixed("bg")),
    ("gradientFROM", Selector::prefixed("from")),
    ("gradientVIA", Selector::prefixed("via")),
    ("gradientTO", Selector::prefixed("to")),
    // Borders
    ("borderWIDTH", Selector::prefixed("border")),
    ("borderXWIDTH", Selector::prefixed("border-x")),
    ("borderYWIDTH", Selector::prefixed("border-y")),
    ("borderTWIDTH", Selector::prefixed("border-t")),
    ("borderRWIDTH", Selector::prefixed("border-r")),
    ("borderBWIDTH", Selector::prefixed("border-b")),
    ("borderLWIDTH", Selector::prefixed("border-l")),
    ("borderCOLOR", Selector::prefixed("border")),
    ("borderOPACITY", Selector::prefixed("border-opacity")),
    ("borderSTYLE", Selector::prefixed("border")),
    ("borderRADIUS", Selector::prefixed("rounded")),
    ("borderTRADIUS", Selector::prefixed("rounded-t")),
    ("borderRRADIUS", Selector::prefixed("rounded-r")),
    ("borderBRADIUS", Selector::prefixed("rounded-b")),
    ("borderLRADIUS", Selector::prefixed("rounded-l")),
    ("divideX", Selector::prefixed("divide-x")),
    ("divideY", Selector::prefixed("divide-y")),
    ("divideCOLOR", Selector::prefixed("divide")),
    ("divideSTYLE", Selector::prefixed("divide")),
    ("outlineWIDTH", Selector::prefixed("outline")),
    ("outlineCOLOR", Selector::prefixed("outline")),
    ("outlineSTYLE", Selector::prefixed("outline")),
    ("outlineOFFSET", Selector::prefixed("outline-offset")),
    ("ringWIDTH", Selector::prefixed("ring")),
    ("ringCOLOR", Selector::prefixed("ring")),
    ("ringOPACITY", Selector::prefixed("ring-opacity")),
    ("ringOFFSETWIDTH", Selector::prefixed("ring-offset")),
    ("ringOFFSETCOLOR", Selector::prefixed("ring-offset")),
    // Effects and filters
    ("shadow", Selector::prefixed("shadow")),
    ("shadowCOLOR", Selector::prefixed("shadow")),
    ("opacity", Selector::prefixed("opacity")),
    ("mixBLEND", Selector::prefixed("mix-blend")),
    ("bgBLEND", Selector::prefixed("bg-blend")),
    ("blur", Selector::prefixed("blur")),
    ("brightness", Selector::prefixed("brightness")),
    ("contrast", Selector::prefixed("contrast")),
    ("dropSHADOW", Selector::prefixed("drop-shadow")),
    ("grayscale", Selector::prefixed("grayscale")),
    ("hueROTATE", Selector::signed("hue-rotate")),
    ("invert", Selector::prefixed("invert")),
    ("saturate", Selector::prefixed("saturate")),
    ("sepia", Selector::prefixed("sepia")),
    ("backdropBLUR", Selector::prefixed("backdrop-blur")),
    ("backdropBRIGHTNESS", Selector::prefixed("backdrop-brightness")),
    ("backdropOPACITY", Selector::prefixed("backdrop-opacity")),
    // Transforms and motion
    ("rotate", Selector::signed("rotate")),
    ("scale", Selector::signed("scale")),
    ("scaleX", Selector::signed("scale-x")),
    ("scaleY", Selector::signed("scale-y")),
    ("translateX", Selector::signed("translate-x")),
    ("translateY", Selector::signed("translate-y")),
    ("skewX", Selector::signed("skew-x")),
    ("skewY", Selector::signed("skew-y")),
    ("origin", Selector::prefixed("origin")),
    ("transition", Selector::prefixed("transition")),
    ("duration", Selector::prefixed("duration")),
    ("ease", Selector::prefixed("ease")),
    ("delay", Selector::prefixed("delay")),
    ("animate", Selector::prefixed("animate")),
    // Interactivity and SVG
    ("cursor", Selector::prefixed("cursor")),
    ("pointerEVENTS", Selector::prefixed("pointer-events")),
    ("resize", Selector::prefixed("resize")),
    ("userSELECT", Selector::prefixed("select")),
    ("scrollBEHAVIOR", Selector::prefixed("scroll")),
    ("snapALIGN", Selector::prefixed("snap")),
    ("snapTYPE", Selector::prefixed("snap")),
    ("touchACTION", Selector::prefixed("touch")),
    ("willCHANGE", Selector::prefixed("will-change")),
    ("appearance", Selector::prefixed("appearance")),
    ("fill", Selector::prefixed("fill")),
    ("stroke", Selector::prefixed("stroke")),
    ("strokeWIDTH", Selector::prefixed("stroke")),
    ("srOnly", Selector::literal("sr-only")),
];

fn registry() -> &'static HashMap<&'static str, Selector> {
    static REGISTRY: OnceLock<HashMap<&'static str, Selector>> = OnceLock::new();
    REGISTRY.get_or_init(|| SELECTORS.iter().copied().collect())
}

/// Look up the metadata for a semantic style key.
pub fn lookup(key: &str) -> Option<Selector> {
    registry().get(key).copied()
}

/// Every registered key, in registration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    SELECTORS.iter().map(|(key, _)| *key)
}
