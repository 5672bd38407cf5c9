//! Layered generic bindings (`T` → concrete type).
//!
//! A persistent association list: `bind` pushes a frame in front of the
//! receiver and shares the tail, so sibling branches never see each other's
//! bindings and lookups fall back along the parent chain.
use std::fmt;
use std::rc::Rc;

struct Frame<T> {
    name: String,
    /// `None` hides every outer binding of `name`.
    ty: Option<T>,
    parent: Option<Rc<Frame<T>>>,
}

pub struct Bindings<T> {
    head: Option<Rc<Frame<T>>>,
}

impl<T> Bindings<T> {
    pub fn empty() -> Self {
        Self { head: None }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// New context with `name` bound to `ty`, shadowing any outer binding.
    #[must_use]
    pub fn bind(&self, name: impl Into<String>, ty: T) -> Self {
        self.push(name.into(), Some(ty))
    }

    /// New context in which `name` is unbound, whatever the outer frames say.
    #[must_use]
    pub fn hide(&self, name: impl Into<String>) -> Self {
        self.push(name.into(), None)
    }

    fn push(&self, name: String, ty: Option<T>) -> Self {
        Self {
            head: Some(Rc::new(Frame { name, ty, parent: self.head.clone() })),
        }
    }

    /// Layer every pair from `pairs` over `self`, in order.
    #[must_use]
    pub fn extend<I>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
    {
        pairs.into_iter().fold(self.clone(), |acc, (name, ty)| acc.bind(name, ty))
    }

    /// Innermost binding for `name`.
    pub fn resolve(&self, name: &str) -> Option<&T> {
        let mut cursor = self.head.as_deref();
        while let Some(frame) = cursor {
            if frame.name == name {
                return frame.ty.as_ref();
            }
            cursor = frame.parent.as_deref();
        }
        None
    }

    fn frames(&self) -> impl Iterator<Item = &Frame<T>> {
        std::iter::successors(self.head.as_deref(), |frame| frame.parent.as_deref())
    }
}

impl<T> Clone for Bindings<T> {
    fn clone(&self) -> Self {
        Self { head: self.head.clone() }
    }
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for Bindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames().map(|frame| (&frame.name, &frame.ty)))
            .finish()
    }
}
