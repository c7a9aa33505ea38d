//! The per-callback diagnostic handle behind every generation's opaque
//! `*_diagnostic_t` pointer.
//!
//! A [`Record`] lives on the stack of the observer call that created it.
//! Pointers it returns (strings, range and fix-it arrays) are owned by the
//! record and released when the handler returns. Accessors cache what they
//! translate, so repeated calls return the same pointers.

use std::cell::OnceCell;
use std::ffi::c_char;
use std::ptr;

use hostc_invoke::{Diagnostic, FixIt, FormatOptions, Location, Range};

use crate::ffi::CStringArena;

/// The C layouts one API generation hands out.
pub(crate) trait Generation {
    type Location: Copy;
    type Range;
    type FixIt;

    fn location(strings: &CStringArena, location: Option<Location<'_>>) -> Self::Location;
    fn range(strings: &CStringArena, range: &Range<'_>) -> Self::Range;
    fn fixit(strings: &CStringArena, fixit: &FixIt<'_>) -> Self::FixIt;
}

pub(crate) struct Record<'v, 'a, G: Generation> {
    view: &'v Diagnostic<'a>,
    strings: CStringArena,
    location: OnceCell<G::Location>,
    name: OnceCell<*const c_char>,
    message: OnceCell<*const c_char>,
    format_string: OnceCell<*const c_char>,
    ranges: OnceCell<Vec<G::Range>>,
    fixits: OnceCell<Vec<G::FixIt>>,
}

impl<'v, 'a, G: Generation> Record<'v, 'a, G> {
    fn new(view: &'v Diagnostic<'a>) -> Self {
        Record {
            view,
            strings: CStringArena::default(),
            location: OnceCell::new(),
            name: OnceCell::new(),
            message: OnceCell::new(),
            format_string: OnceCell::new(),
            ranges: OnceCell::new(),
            fixits: OnceCell::new(),
        }
    }

    pub(crate) fn view(&self) -> &Diagnostic<'a> {
        self.view
    }

    pub(crate) fn location(&self) -> G::Location {
        *self
            .location
            .get_or_init(|| G::location(&self.strings, self.view.location()))
    }

    pub(crate) fn name(&self) -> *const c_char {
        *self.name.get_or_init(|| self.strings.alloc(self.view.name()))
    }

    pub(crate) fn message(&self) -> *const c_char {
        *self
            .message
            .get_or_init(|| self.strings.alloc(self.view.message()))
    }

    pub(crate) fn format_string(&self) -> *const c_char {
        *self
            .format_string
            .get_or_init(|| self.strings.alloc(self.view.format_string()))
    }

    pub(crate) fn message_with_format_string(&self, format: &str) -> *const c_char {
        self.strings.alloc(&self.view.message_with_format_string(format))
    }

    pub(crate) fn message_with_options(&self, options: &FormatOptions) -> *const c_char {
        self.strings.alloc(&self.view.message_with_options(options))
    }

    /// The ranges as a C array; NULL when there are none.
    pub(crate) fn ranges(&self) -> (*const G::Range, usize) {
        let ranges = self.ranges.get_or_init(|| {
            self.view
                .ranges()
                .iter()
                .map(|range| G::range(&self.strings, range))
                .collect()
        });
        as_c_array(ranges)
    }

    /// The fix-its as a C array; NULL when there are none.
    pub(crate) fn fixits(&self) -> (*const G::FixIt, usize) {
        let fixits = self.fixits.get_or_init(|| {
            self.view
                .fixits()
                .iter()
                .map(|fixit| G::fixit(&self.strings, fixit))
                .collect()
        });
        as_c_array(fixits)
    }
}

fn as_c_array<T>(items: &[T]) -> (*const T, usize) {
    if items.is_empty() {
        (ptr::null(), 0)
    } else {
        (items.as_ptr(), items.len())
    }
}

/// Wrap `view` in a record and pass it to `call` as the opaque handle `H`.
pub(crate) fn with_handle<G: Generation, H>(view: &Diagnostic<'_>, call: impl FnOnce(*const H)) {
    let record = Record::<'_, '_, G>::new(view);
    call(ptr::from_ref(&record).cast::<H>());
}

/// Recover the record behind a handle minted by [`with_handle`].
///
/// The handle is only valid during the handler call it was passed to;
/// using it afterwards is undefined behavior, as the C headers state.
pub(crate) fn from_handle<'r, G: Generation, H>(handle: *const H) -> Option<&'r Record<'r, 'r, G>> {
    // SAFETY: non-null handles come from `with_handle` and point at a live
    // record for as long as the host is inside the handler call
    unsafe { handle.cast::<Record<'r, 'r, G>>().as_ref() }
}
