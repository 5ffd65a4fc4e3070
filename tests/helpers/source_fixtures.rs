//! WebIDL sources shaped like the files in a browser tree.

pub const WINDOW: &str = r#"/* -*- Mode: IDL; tab-width: 2; indent-tabs-mode: nil; c-basic-offset: 2 -*- */
/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. */

typedef OfflineResourceList ApplicationCache;

// http://www.whatwg.org/specs/web-apps/current-work/
[Global=Window, LegacyUnenumerableNamedProperties, NeedResourceWriterOnPrototype,
 Exposed=Window,
 InstrumentedProps=(AbsoluteOrientationSensor,
                    Accelerometer,
                    BackgroundFetchManager,
                    Bluetooth)]
/*sealed*/ interface Window : EventTarget {
  // the current browsing context
  [LegacyUnforgeable, Constant, StoreInSlot,
   CrossOriginReadable] readonly attribute WindowProxy window;
  [Replaceable, Constant, StoreInSlot,
   CrossOriginReadable] readonly attribute WindowProxy self;
  [LegacyUnforgeable, StoreInSlot, Pure] readonly attribute Document? document;
  [Throws] attribute DOMString name;
  [PutForwards=href, LegacyUnforgeable, CrossOriginReadable,
   CrossOriginWritable] readonly attribute Location location;
  [Throws, CrossOriginCallable, NeedsSubjectPrincipal]
  undefined close();
  [Throws, CrossOriginCallable] undefined postMessage(any message, DOMString targetOrigin, optional sequence<object> transfer = []);
  getter object (DOMString name);
};

Window includes GlobalEventHandlers;
Window includes WindowEventHandlers;

partial interface Window {
  [Throws, Func="nsGlobalWindowInner::IsRequestIdleCallbackEnabled"]
  unsigned long requestIdleCallback(IdleRequestCallback callback,
                                    optional IdleRequestOptions options = {});
};
"#;

pub const NODE_LIST: &str = r#"[Exposed=Window, ProbablyShortLivingWrapper,
 InstrumentedProps=(entries,forEach,keys,values)]
interface NodeList {
  getter Node? item(unsigned long index);
  readonly attribute unsigned long length;
  iterable<Node?>;
};
"#;

pub const EVENT: &str = r#"[Exposed=(Window,Worker,AudioWorklet), ProbablyShortLivingWrapper]
interface Event {
  constructor(DOMString type, optional EventInit eventInitDict = {});

  [Pure]
  readonly attribute DOMString type;
  const unsigned short NONE = 0;
  const unsigned short CAPTURING_PHASE = 1;
  [Pure]
  readonly attribute unsigned short eventPhase;
  undefined stopPropagation();
  [NeedsCallerType]
  undefined preventDefault();
  [Pure, NeedsCallerType]
  readonly attribute boolean defaultPrevented;
  [Constant]
  readonly attribute DOMHighResTimeStamp timeStamp;
};

dictionary EventInit {
  boolean bubbles = false;
  boolean cancelable = false;
  boolean composed = false;
};
"#;

pub const MISC: &str = r#"enum ScrollBehavior { "auto", "instant", "smooth" };

callback FrameRequestCallback = undefined (DOMHighResTimeStamp time);

[LegacyTreatNonObjectAsNull]
callback EventHandlerNonNull = any (Event event);
typedef EventHandlerNonNull? EventHandler;

[Exposed=Window]
namespace CSS {
  boolean supports(UTF8String property, UTF8String value);
};

interface mixin WindowOrWorkerGlobalScope {
  [Replaceable] readonly attribute USVString origin;
};

[Exposed=Window]
interface FormData {
  constructor(optional HTMLFormElement form, optional HTMLElement? submitter = null);
  undefined append(USVString name, (Blob or USVString) value);
  iterable<USVString, FormDataEntryValue>;
};

[Exposed=Window]
interface Headers {
  readonly maplike<ByteString, ByteString>;
  stringifier;
  static Headers create();
  setter undefined (DOMString name, DOMString value);
  deleter undefined (DOMString name);
};
"#;
