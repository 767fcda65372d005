//! Fast, but limited allocator with stable handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A struct representing a handle to an occupied slot in `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// All objects inside the arena will be destroyed when the arena is destroyed. The arena also
/// supports deallocation of objects once they are allocated and yields both mutable and immutable
/// references to objects. The underlying container is simply a `Vec` of fixed-capacity chunks so
/// the code itself is very simple and uses no unsafe code. When the arena is full, it will
/// allocate another chunk of objects so no memory is reallocated: occupied slots never move, and
/// a handle stays valid until the object it names is freed.
///
/// Cloning an arena clones every slot in place, so a handle obtained from the original names the
/// clone of the same object in the copy.
///
/// # Examples
///
/// ```
/// use ordered_collections::arena::Arena;
///
/// let mut arena = Arena::new(64);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// ```
#[derive(Clone)]
pub struct Arena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> Arena<T> {
    fn is_valid_handle(&self, handle: &Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `Arena<T>` with a specific number of objects per chunk.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// // creates a new Arena<T> that contains a maximum of 64 u32's per chunk
    /// let arena: Arena<u32> = Arena::new(64);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        Arena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            capacity: 0,
        }
    }

    /// Allocates an object in the arena and returns a `Handle` to it. The handle can later be
    /// used to retrieve mutable and immutable references to the object, and to deallocate the
    /// object. Vacated slots are reused before new slots are created.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.size == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.size += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                }
            }
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        let ret = handle;
                        self.head = next_handle;
                        ret
                    }
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            }
        }
    }

    /// Deallocates an object in the arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if `handle` corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head.take()),
        );
        match old_block {
            Block::Vacant(_) => panic!("Error: attempting to free vacant block."),
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(Handle {
                    chunk_index: handle.chunk_index,
                    block_index: handle.block_index,
                });
                value
            }
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(&x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of objects currently allocated in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new(64);
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots the arena has reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// arena.allocate(0);
    /// assert_eq!(arena.capacity(), 64);
    /// ```
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the largest number of objects an arena of this type could ever hold, bounded by
    /// the address space.
    pub fn max_len(&self) -> usize {
        usize::max_value() / mem::size_of::<T>().max(1)
    }

    /// Removes all objects from the arena and releases its chunks. All outstanding handles are
    /// invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new(64);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert_eq!(arena.get(&x), None);
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.size = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;
    use super::Handle;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: Arena<u32> = Arena::new(64);
        arena.free(&Handle {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = Arena::new(64);
        let handle = arena.allocate(0);
        arena.free(&handle);
        arena.free(&handle);
    }

    #[test]
    fn test_allocate() {
        let mut pool = Arena::new(64);
        assert_eq!(
            pool.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            pool.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(
            pool.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 2
            },
        );
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut pool = Arena::new(2);
        assert_eq!(
            pool.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            pool.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(
            pool.allocate(0),
            Handle {
                chunk_index: 1,
                block_index: 0
            },
        );
    }

    #[test]
    fn test_free() {
        let mut pool = Arena::new(64);
        let handle = pool.allocate(0);
        assert_eq!(
            handle,
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(pool.free(&handle), 0);
        assert_eq!(pool.allocate(0), handle);
    }

    #[test]
    fn test_free_reuses_lifo() {
        let mut pool = Arena::new(64);
        let a = pool.allocate(0);
        let b = pool.allocate(1);
        pool.free(&a);
        pool.free(&b);
        assert_eq!(pool.allocate(2), b);
        assert_eq!(pool.allocate(3), a);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_get() {
        let mut pool = Arena::new(64);
        let handle = pool.allocate(0);
        assert_eq!(pool.get(&handle), Some(&0));
    }

    #[test]
    fn test_get_invalid_block() {
        let pool: Arena<u32> = Arena::new(64);
        assert_eq!(
            pool.get(&Handle {
                chunk_index: 0,
                block_index: 0
            }),
            None,
        );
    }

    #[test]
    fn test_get_vacant_block() {
        let mut pool = Arena::new(64);
        let handle = pool.allocate(0);
        pool.free(&handle);
        assert_eq!(pool.get(&handle), None);
    }

    #[test]
    fn test_get_mut() {
        let mut pool = Arena::new(64);
        let handle = pool.allocate(0);
        *pool.get_mut(&handle).unwrap() = 1;
        assert_eq!(pool.get(&handle), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut pool = Arena::new(2);
        let handle = pool.allocate(0);
        pool.allocate(1);
        pool.allocate(2);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 0);
        assert_eq!(pool.get(&handle), None);
        assert_eq!(
            pool.allocate(3),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
    }

    #[test]
    fn test_clone_preserves_handles() {
        let mut pool = Arena::new(2);
        let a = pool.allocate(10);
        let b = pool.allocate(20);
        let c = pool.allocate(30);
        pool.free(&b);

        let mut copy = pool.clone();
        assert_eq!(copy.get(&a), Some(&10));
        assert_eq!(copy.get(&b), None);
        assert_eq!(copy.get(&c), Some(&30));

        copy[a] = 11;
        assert_eq!(pool[a], 10);
        assert_eq!(copy.allocate(21), b);
    }
}
