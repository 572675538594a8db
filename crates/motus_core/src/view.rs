//! View tree
//!
//! The animation target model. A [`ViewTree`] owns every on-screen element
//! as a [`View`] node addressed by [`ViewId`]. Views expose a fixed set of
//! named scalar properties ([`Property`]) that animations read and write,
//! a [`Visibility`] flag, and an optional parent container.
//!
//! Position follows the mobile convention: `left`/`top` are the layout
//! position inside the parent, `translation_x`/`translation_y` are an
//! offset on top of it, and the `X`/`Y` properties are their sum.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{Result, ViewError};
use crate::geometry::{Point, Rect, Size};

new_key_type! {
    /// Unique identifier for a view in a [`ViewTree`]
    pub struct ViewId;
}

/// Named scalar properties that can be animated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Opacity (0.0 to 1.0)
    Alpha,
    /// Horizontal scale factor around the view center
    ScaleX,
    /// Vertical scale factor around the view center
    ScaleY,
    /// Horizontal offset from the layout position, in pixels
    TranslationX,
    /// Vertical offset from the layout position, in pixels
    TranslationY,
    /// Rotation around the vertical axis, in degrees
    RotationY,
    /// Visual x position (`left + translation_x`)
    X,
    /// Visual y position (`top + translation_y`)
    Y,
}

impl Property {
    /// Every animatable property, in declaration order
    pub const ALL: [Property; 8] = [
        Property::Alpha,
        Property::ScaleX,
        Property::ScaleY,
        Property::TranslationX,
        Property::TranslationY,
        Property::RotationY,
        Property::X,
        Property::Y,
    ];

    /// Lowercase name used in logs and traces
    pub fn name(&self) -> &'static str {
        match self {
            Property::Alpha => "alpha",
            Property::ScaleX => "scale_x",
            Property::ScaleY => "scale_y",
            Property::TranslationX => "translation_x",
            Property::TranslationY => "translation_y",
            Property::RotationY => "rotation_y",
            Property::X => "x",
            Property::Y => "y",
        }
    }
}

/// Visibility state of a view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Drawn and hit-testable
    #[default]
    Visible,
    /// Not drawn, but still takes up layout space
    Invisible,
    /// Not drawn and takes no layout space
    Gone,
}

/// A single element in the view tree
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub translation_x: f32,
    pub translation_y: f32,
    pub rotation_y: f32,
    pub visibility: Visibility,
    parent: Option<ViewId>,
    children: SmallVec<[ViewId; 4]>,
}

impl Default for View {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl View {
    /// Create a visible, untransformed view of the given size at (0, 0)
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translation_x: 0.0,
            translation_y: 0.0,
            rotation_y: 0.0,
            visibility: Visibility::Visible,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Builder: set layout position inside the parent
    pub fn at(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Builder: set opacity
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder: set visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Read a named property
    pub fn property(&self, property: Property) -> f32 {
        match property {
            Property::Alpha => self.alpha,
            Property::ScaleX => self.scale_x,
            Property::ScaleY => self.scale_y,
            Property::TranslationX => self.translation_x,
            Property::TranslationY => self.translation_y,
            Property::RotationY => self.rotation_y,
            Property::X => self.left + self.translation_x,
            Property::Y => self.top + self.translation_y,
        }
    }

    /// Write a named property
    pub fn set_property(&mut self, property: Property, value: f32) {
        match property {
            Property::Alpha => self.alpha = value,
            Property::ScaleX => self.scale_x = value,
            Property::ScaleY => self.scale_y = value,
            Property::TranslationX => self.translation_x = value,
            Property::TranslationY => self.translation_y = value,
            Property::RotationY => self.rotation_y = value,
            Property::X => self.translation_x = value - self.left,
            Property::Y => self.translation_y = value - self.top,
        }
    }

    /// Visual position (layout position plus translation)
    pub fn position(&self) -> Point {
        Point::new(self.property(Property::X), self.property(Property::Y))
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }
}

/// Arena owning every view and the parent/child relationships between them
#[derive(Debug, Default)]
pub struct ViewTree {
    views: SlotMap<ViewId, View>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            views: SlotMap::with_key(),
        }
    }

    /// Insert a detached view
    pub fn insert(&mut self, mut view: View) -> ViewId {
        view.parent = None;
        view.children.clear();
        self.views.insert(view)
    }

    /// Insert a view as the last child of `parent`
    pub fn insert_child(&mut self, parent: ViewId, view: View) -> Result<ViewId> {
        if !self.views.contains_key(parent) {
            return Err(ViewError::UnknownView(parent));
        }
        let id = self.insert(view);
        self.attach(parent, id);
        Ok(id)
    }

    /// Attach an existing view to `parent`, detaching it from any previous parent
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.ensure(parent)?;
        self.ensure(child)?;
        if self.ancestors_or_self(parent).any(|id| id == child) {
            return Err(ViewError::WouldCycle { parent, child });
        }
        if let Some(previous) = self.views[child].parent {
            self.remove_child(previous, child)?;
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays in the tree.
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.ensure(child)?;
        let parent_view = self
            .views
            .get_mut(parent)
            .ok_or(ViewError::UnknownView(parent))?;

        let Some(index) = parent_view.children.iter().position(|c| *c == child) else {
            return Err(ViewError::NotAChild { parent, child });
        };
        parent_view.children.remove(index);
        self.views[child].parent = None;

        tracing::trace!("Detached view {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Detach a view from whatever container holds it, returning that container
    pub fn remove_from_parent(&mut self, child: ViewId) -> Result<ViewId> {
        self.ensure(child)?;
        let parent = self
            .parent(child)
            .ok_or(ViewError::NoParent(child))?;
        self.remove_child(parent, child)?;
        Ok(parent)
    }

    /// Remove a view and its whole subtree from the tree
    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        if let Some(parent) = self.parent(id) {
            if let Err(err) = self.remove_child(parent, id) {
                tracing::warn!("Cannot detach {:?} before removal: {}", id, err);
            }
        }

        let view = self.views.remove(id)?;
        for child in view.children.iter() {
            self.remove_subtree(*child);
        }
        Some(view)
    }

    fn remove_subtree(&mut self, id: ViewId) {
        if let Some(view) = self.views.remove(id) {
            for child in view.children {
                self.remove_subtree(child);
            }
        }
    }

    fn attach(&mut self, parent: ViewId, child: ViewId) {
        self.views[child].parent = Some(parent);
        self.views[parent].children.push(child);
    }

    fn ancestors_or_self(&self, id: ViewId) -> impl Iterator<Item = ViewId> + '_ {
        std::iter::successors(Some(id), |cur| self.views.get(*cur).and_then(|v| v.parent))
    }

    fn ensure(&self, id: ViewId) -> Result<()> {
        if self.views.contains_key(id) {
            Ok(())
        } else {
            Err(ViewError::UnknownView(id))
        }
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    /// Read a named property of a view
    pub fn property(&self, id: ViewId, property: Property) -> Option<f32> {
        self.views.get(id).map(|v| v.property(property))
    }

    /// Write a named property of a view
    pub fn set_property(&mut self, id: ViewId, property: Property, value: f32) -> Result<()> {
        let view = self.views.get_mut(id).ok_or(ViewError::UnknownView(id))?;
        view.set_property(property, value);
        Ok(())
    }

    pub fn visibility(&self, id: ViewId) -> Option<Visibility> {
        self.views.get(id).map(|v| v.visibility)
    }

    pub fn set_visibility(&mut self, id: ViewId, visibility: Visibility) -> Result<()> {
        let view = self.views.get_mut(id).ok_or(ViewError::UnknownView(id))?;
        view.visibility = visibility;
        Ok(())
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id).and_then(|v| v.parent)
    }

    /// Direct children of a container, in insertion order
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.views.get(id).map(|v| v.children()).unwrap_or(&[])
    }

    /// Window-space origin of a view's untransformed box plus its translation
    fn window_origin(&self, id: ViewId) -> Option<Point> {
        let mut origin = Point::ZERO;
        let mut current = Some(id);
        while let Some(cur) = current {
            let view = self.views.get(cur)?;
            origin.x += view.property(Property::X);
            origin.y += view.property(Property::Y);
            current = view.parent;
        }
        Some(origin)
    }

    /// The part of a view visible on screen, in window coordinates.
    ///
    /// Scale is applied around the view center and the result is clipped
    /// to every ancestor. Returns `None` when the view, or any ancestor,
    /// is not visible or the clipped area is empty.
    pub fn global_visible_rect(&self, id: ViewId) -> Option<Rect> {
        let view = self.views.get(id)?;
        if !view.is_visible() {
            return None;
        }

        let origin = self.window_origin(id)?;
        let rect = Rect::from_origin_size(origin, view.size())
            .scale_about_center(view.scale_x, view.scale_y);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }

        match view.parent {
            Some(parent) => rect.intersect(&self.global_visible_rect(parent)?),
            None => Some(rect),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &View)> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
